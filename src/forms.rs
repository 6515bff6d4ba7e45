//! Form state for the login, admin and profile screens
//!
//! Text fields are edited in place by the key handlers in `app`;
//! validation happens only on submit.

use thiserror::Error;

use crate::models::{CatalogItem, CatalogPatch, UserProfile, GENRES};

// =============================================================================
// Text Input
// =============================================================================

/// Single-line text field with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset of the cursor
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index())
    }

    /// Trimmed value, or None when blank
    pub fn non_empty(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    /// Simulated sign-in in flight
    pub submitting: bool,
}

impl LoginForm {
    /// Sign-in succeeds iff both fields are filled
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

// =============================================================================
// Admin Form
// =============================================================================

/// Validation errors for the admin form
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Image URL is required")]
    MissingImage,

    #[error("Genre is required")]
    MissingGenre,

    #[error("Rating must be a number between 0 and 10, got '{0}'")]
    InvalidRating(String),

    #[error("Year must be between {min} and {max}, got '{value}'")]
    InvalidYear { value: String, min: u16, max: u16 },
}

/// Accepted release years
pub const YEAR_RANGE: std::ops::RangeInclusive<u16> = 1900..=2030;

/// Fields of the admin form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminField {
    #[default]
    Title,
    Year,
    Genre,
    Rating,
    ImageUrl,
    Description,
    TrailerUrl,
    Featured,
}

impl AdminField {
    pub const ALL: [AdminField; 8] = [
        AdminField::Title,
        AdminField::Year,
        AdminField::Genre,
        AdminField::Rating,
        AdminField::ImageUrl,
        AdminField::Description,
        AdminField::TrailerUrl,
        AdminField::Featured,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminField::Title => "Title",
            AdminField::Year => "Year",
            AdminField::Genre => "Genre",
            AdminField::Rating => "Rating",
            AdminField::ImageUrl => "Image URL",
            AdminField::Description => "Description",
            AdminField::TrailerUrl => "Trailer URL",
            AdminField::Featured => "Featured",
        }
    }
}

/// Create/edit form for a catalog item
#[derive(Debug, Clone)]
pub struct AdminForm {
    /// Id of the item being edited, None when creating
    pub editing: Option<u64>,
    pub title: TextInput,
    pub year: TextInput,
    pub genre: String,
    pub rating: TextInput,
    pub image_url: TextInput,
    pub description: TextInput,
    pub trailer_url: TextInput,
    pub featured: bool,
    pub focus: AdminField,
    /// Save request in flight
    pub saving: bool,
}

impl AdminForm {
    /// Blank form for a new item
    pub fn new_item(current_year: u16) -> Self {
        Self {
            editing: None,
            title: TextInput::default(),
            year: TextInput::new(current_year.to_string()),
            genre: String::new(),
            rating: TextInput::new("0"),
            image_url: TextInput::default(),
            description: TextInput::default(),
            trailer_url: TextInput::default(),
            featured: false,
            focus: AdminField::Title,
            saving: false,
        }
    }

    /// Form pre-filled from an existing item
    pub fn from_item(item: &CatalogItem, current_year: u16) -> Self {
        Self {
            editing: item.id,
            title: TextInput::new(item.title.clone()),
            year: TextInput::new(item.release_year.unwrap_or(current_year).to_string()),
            genre: item.genre.clone(),
            rating: TextInput::new(item.rating.to_string()),
            image_url: TextInput::new(item.image_url.clone()),
            description: TextInput::new(item.description.clone().unwrap_or_default()),
            trailer_url: TextInput::new(item.trailer_url.clone().unwrap_or_default()),
            featured: item.featured,
            focus: AdminField::Title,
            saving: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Text input behind the focused field, if it is a text field
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            AdminField::Title => Some(&mut self.title),
            AdminField::Year => Some(&mut self.year),
            AdminField::Rating => Some(&mut self.rating),
            AdminField::ImageUrl => Some(&mut self.image_url),
            AdminField::Description => Some(&mut self.description),
            AdminField::TrailerUrl => Some(&mut self.trailer_url),
            AdminField::Genre | AdminField::Featured => None,
        }
    }

    /// Step through the genre list
    pub fn cycle_genre(&mut self, forward: bool) {
        let len = GENRES.len();
        let next = match GENRES.iter().position(|g| *g == self.genre) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.genre = GENRES[next].to_string();
    }

    pub fn toggle_featured(&mut self) {
        self.featured = !self.featured;
    }

    /// Validate and build the item described by the form
    pub fn to_item(&self) -> Result<CatalogItem, FormError> {
        let title = self.title.non_empty().ok_or(FormError::MissingTitle)?;
        let image_url = self.image_url.non_empty().ok_or(FormError::MissingImage)?;

        let rating_str = self.rating.value().trim();
        let rating: f32 = rating_str
            .parse()
            .ok()
            .filter(|r: &f32| (0.0..=10.0).contains(r))
            .ok_or_else(|| FormError::InvalidRating(rating_str.to_string()))?;

        let year_str = self.year.value().trim();
        let release_year = if year_str.is_empty() {
            None
        } else {
            let year = year_str
                .parse::<u16>()
                .ok()
                .filter(|y| YEAR_RANGE.contains(y))
                .ok_or_else(|| FormError::InvalidYear {
                    value: year_str.to_string(),
                    min: *YEAR_RANGE.start(),
                    max: *YEAR_RANGE.end(),
                })?;
            Some(year)
        };

        if self.genre.trim().is_empty() {
            return Err(FormError::MissingGenre);
        }

        Ok(CatalogItem {
            id: self.editing,
            title,
            genre: self.genre.clone(),
            rating,
            image_url,
            featured: self.featured,
            description: self.description.non_empty(),
            release_year,
            trailer_url: self.trailer_url.non_empty(),
            video_url: None,
        })
    }

    /// Validate and build the update body for an edit
    pub fn to_patch(&self) -> Result<CatalogPatch, FormError> {
        let item = self.to_item()?;
        let mut patch = CatalogPatch::from(&item);
        // Cleared optional fields are sent as empty strings so the server drops them
        patch.description = Some(item.description.unwrap_or_default());
        patch.trailer_url = Some(item.trailer_url.unwrap_or_default());
        patch.video_url = None;
        Ok(patch)
    }
}

// =============================================================================
// Profile Draft
// =============================================================================

/// Editable profile fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
    Phone,
    Bio,
}

impl ProfileField {
    pub fn next(self) -> Self {
        match self {
            ProfileField::Name => ProfileField::Email,
            ProfileField::Email => ProfileField::Phone,
            ProfileField::Phone => ProfileField::Bio,
            ProfileField::Bio => ProfileField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ProfileField::Name => ProfileField::Bio,
            ProfileField::Email => ProfileField::Name,
            ProfileField::Phone => ProfileField::Email,
            ProfileField::Bio => ProfileField::Phone,
        }
    }
}

/// In-progress edit of the user profile
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub name: TextInput,
    pub email: TextInput,
    pub phone: TextInput,
    pub bio: TextInput,
    pub focus: ProfileField,
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: TextInput::new(profile.name.clone()),
            email: TextInput::new(profile.email.clone()),
            phone: TextInput::new(profile.phone.clone()),
            bio: TextInput::new(profile.bio.clone()),
            focus: ProfileField::Name,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Bio => &mut self.bio,
        }
    }

    /// Copy the edited fields onto the profile
    pub fn apply(&self, profile: &mut UserProfile) {
        profile.name = self.name.value().to_string();
        profile.email = self.email.value().to_string();
        profile.phone = self.phone.value().to_string();
        profile.bio = self.bio.value().to_string();
    }
}
