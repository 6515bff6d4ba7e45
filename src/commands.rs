//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the catalog client.
//! Each handler takes CLI args and Output, returns ExitCode.

use std::path::Path;

use crate::api::{CatalogClient, CatalogError};
use crate::cli::{
    CreateCmd, DeleteCmd, Deleted, EmbedCmd, EmbedResponse, ExitCode, GetCmd, ListCmd, Output,
    UpdateCmd,
};
use crate::config::Config;
use crate::forms::{FormError, YEAR_RANGE};
use crate::models::{filter_items, CatalogItem};
use crate::player::{embed_url, extract_video_id};

/// Load config from `--config` or the default location
pub fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Build the catalog client: `--api-url` first, then env/config/default
pub fn client_for(config: &Config, api_url: Option<&str>) -> CatalogClient {
    let base = api_url
        .map(str::to_string)
        .unwrap_or_else(|| config.api_base_url());
    CatalogClient::with_base_url(base)
}

/// Map a catalog failure to a semantic exit code
pub fn exit_code_for(error: &CatalogError) -> ExitCode {
    match error {
        CatalogError::NotFound => ExitCode::NotFound,
        CatalogError::RequestFailed(_) => ExitCode::NetworkError,
        CatalogError::Status(_) | CatalogError::InvalidResponse(_) => ExitCode::Error,
    }
}

/// One-line human summary of an item
fn summary(item: &CatalogItem) -> String {
    let id = item.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
    let featured = if item.featured { "  [featured]" } else { "" };
    format!("{:>4}  {}{}", id, item, featured)
}

/// Range checks shared by create and update
fn validate_fields(rating: Option<f32>, year: Option<u16>) -> Result<(), FormError> {
    if let Some(rating) = rating {
        if !(0.0..=10.0).contains(&rating) {
            return Err(FormError::InvalidRating(rating.to_string()));
        }
    }
    if let Some(year) = year {
        if !YEAR_RANGE.contains(&year) {
            return Err(FormError::InvalidYear {
                value: year.to_string(),
                min: *YEAR_RANGE.start(),
                max: *YEAR_RANGE.end(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching catalog from {}...", client.base_url()));

    let items = match client.list().await {
        Ok(items) => items,
        Err(e) => return output.error(format!("List failed: {}", e), exit_code_for(&e)),
    };

    let mut results: Vec<&CatalogItem> = filter_items(&items, cmd.search.as_deref().unwrap_or(""));
    if cmd.featured {
        results.retain(|item| item.featured);
    }
    if let Some(limit) = cmd.limit {
        results.truncate(limit);
    }

    let text = if results.is_empty() {
        "No movies found".to_string()
    } else {
        results.iter().map(|item| summary(item)).collect::<Vec<_>>().join("\n")
    };

    if let Err(e) = output.print_or(&results, text) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Get Command
// =============================================================================

pub async fn get_cmd(cmd: GetCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    match client.get(cmd.id).await {
        Ok(item) => {
            let mut text = summary(&item);
            if let Some(description) = &item.description {
                text.push_str(&format!("\n\n{}", description));
            }
            if let Some(trailer) = &item.trailer_url {
                text.push_str(&format!("\n\nTrailer: {}", trailer));
            }

            if let Err(e) = output.print_or(&item, text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(CatalogError::NotFound) => {
            output.error(format!("Movie {} not found", cmd.id), ExitCode::NotFound)
        }
        Err(e) => output.error(format!("Get failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Create Command
// =============================================================================

pub async fn create_cmd(cmd: CreateCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let item = cmd.to_item();

    if item.title.trim().is_empty() {
        return output.error(FormError::MissingTitle.to_string(), ExitCode::InvalidArgs);
    }
    if item.image_url.trim().is_empty() {
        return output.error(FormError::MissingImage.to_string(), ExitCode::InvalidArgs);
    }
    if item.genre.trim().is_empty() {
        return output.error(FormError::MissingGenre.to_string(), ExitCode::InvalidArgs);
    }
    if let Err(e) = validate_fields(Some(item.rating), item.release_year) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }

    match client.create(&item).await {
        Ok(created) => {
            let text = format!("Created: {}", summary(&created));
            if let Err(e) = output.print_or(&created, text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Create failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Update Command
// =============================================================================

pub async fn update_cmd(cmd: UpdateCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let patch = cmd.to_patch();

    if patch.is_empty() {
        return output.error("Nothing to update: pass at least one field", ExitCode::InvalidArgs);
    }
    if let Err(e) = validate_fields(patch.rating, patch.release_year) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }

    match client.update(cmd.id, &patch).await {
        Ok(updated) => {
            let text = format!("Updated: {}", summary(&updated));
            if let Err(e) = output.print_or(&updated, text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(CatalogError::NotFound) => {
            output.error(format!("Movie {} not found", cmd.id), ExitCode::NotFound)
        }
        Err(e) => output.error(format!("Update failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Delete Command
// =============================================================================

pub async fn delete_cmd(cmd: DeleteCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    match client.delete(cmd.id).await {
        Ok(()) => {
            let response = Deleted {
                id: cmd.id,
                deleted: true,
            };
            if let Err(e) = output.print_or(&response, format!("Deleted movie {}", cmd.id)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(CatalogError::NotFound) => {
            output.error(format!("Movie {} not found", cmd.id), ExitCode::NotFound)
        }
        Err(e) => output.error(format!("Delete failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Embed Command
// =============================================================================

pub fn embed_cmd(cmd: EmbedCmd, output: &Output) -> ExitCode {
    let video_id = extract_video_id(&cmd.url).map(str::to_string);
    if video_id.is_none() {
        output.info("Not a recognized YouTube link, URL left unchanged");
    }

    let response = EmbedResponse {
        video_id,
        embed_url: embed_url(&cmd.url, cmd.embed_profile()),
    };
    let text = response.embed_url.clone();

    if let Err(e) = output.print_or(&response, text) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&CatalogError::NotFound), ExitCode::NotFound);
        assert_eq!(exit_code_for(&CatalogError::Status(500)), ExitCode::Error);
        assert_eq!(
            exit_code_for(&CatalogError::InvalidResponse("bad".into())),
            ExitCode::Error
        );
    }

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields(Some(7.5), Some(2020)).is_ok());
        assert!(validate_fields(None, None).is_ok());
        assert!(matches!(
            validate_fields(Some(11.0), None),
            Err(FormError::InvalidRating(_))
        ));
        assert!(matches!(
            validate_fields(None, Some(1800)),
            Err(FormError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_api_url_flag_wins() {
        let config = Config {
            api_base_url: Some("http://from-config/api".into()),
            ..Default::default()
        };
        let client = client_for(&config, Some("http://from-flag/api/"));
        assert_eq!(client.base_url(), "http://from-flag/api");
    }

    #[test]
    fn test_summary_line() {
        let mut item = CatalogItem::new("Night Terror", "Horror", 7.1, "https://img.example/n.jpg");
        item.id = Some(4);
        item.featured = true;
        let line = summary(&item);
        assert!(line.contains("Night Terror"));
        assert!(line.contains("★ 7.1"));
        assert!(line.ends_with("[featured]"));
    }
}
