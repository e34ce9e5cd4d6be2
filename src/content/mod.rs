//! Managed storefront content
//!
//! Typed access to the tables the admin console edits alongside the theme: hero slides, featured
//! selections, and page layout sections. [`SettingsAdmin`] saves theme settings.

mod admin;

pub use admin::SettingsAdmin;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::PageStyles;
use crate::remote::{Filter, OrderBy, RemoteDataService, RemoteError, Row};

pub const HERO_SLIDES_TABLE: &str = "hero_slides";
pub const FEATURED_CONTENT_TABLE: &str = "featured_content";
pub const PAGE_SECTIONS_TABLE: &str = "page_layout_sections";

/// Errors from content operations
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Invalid content record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One slide of the home page hero carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default = "enabled")]
    pub is_active: bool,
}

/// Section a featured item is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturedSection {
    Classes,
    Products,
    Subscriptions,
}

impl FeaturedSection {
    pub fn as_str(self) -> &'static str {
        match self {
            FeaturedSection::Classes => "classes",
            FeaturedSection::Products => "products",
            FeaturedSection::Subscriptions => "subscriptions",
        }
    }
}

/// An item picked for a featured section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedSelection {
    pub id: String,
    pub section: FeaturedSection,
    pub item_id: String,
    #[serde(default)]
    pub position: i64,
}

/// One block of a page's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: String,
    pub page: String,
    pub section_type: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default = "enabled")]
    pub is_visible: bool,
    /// Section-specific options, including per-page button overrides
    #[serde(default)]
    pub settings: Value,
}

fn enabled() -> bool {
    true
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, ContentError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(ContentError::from))
        .collect()
}

fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, ContentError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn encode_row<T: Serialize>(record: &T) -> Result<Row, ContentError> {
    match serde_json::to_value(record)? {
        Value::Object(row) => Ok(row),
        other => Err(ContentError::Decode(<serde_json::Error as serde::ser::Error>::custom(format!(
            "expected an object, got {other}"
        )))),
    }
}

/// Typed repository over the content tables
#[derive(Clone)]
pub struct ContentRepository {
    remote: Arc<dyn RemoteDataService>,
}

impl ContentRepository {
    pub fn new(remote: Arc<dyn RemoteDataService>) -> Self {
        Self { remote }
    }

    async fn list_ordered<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<T>, ContentError> {
        let rows = self
            .remote
            .list(table, filter, Some(&OrderBy::asc("position")))
            .await?;
        decode_rows(rows)
    }

    async fn save<T: Serialize + DeserializeOwned>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<T, ContentError> {
        let row = encode_row(record)?;
        let stored = self.remote.upsert(table, row, "id").await?;
        decode_row(stored)
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<bool, ContentError> {
        let removed = self.remote.delete(table, &Filter::eq("id", id)).await?;
        Ok(removed > 0)
    }

    /// All hero slides by position
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, ContentError> {
        self.list_ordered(HERO_SLIDES_TABLE, None).await
    }

    /// Slides shown on the public site
    pub async fn active_hero_slides(&self) -> Result<Vec<HeroSlide>, ContentError> {
        self.list_ordered(HERO_SLIDES_TABLE, Some(&Filter::eq("is_active", true)))
            .await
    }

    pub async fn save_hero_slide(&self, slide: &HeroSlide) -> Result<HeroSlide, ContentError> {
        self.save(HERO_SLIDES_TABLE, slide).await
    }

    pub async fn delete_hero_slide(&self, id: &str) -> Result<bool, ContentError> {
        self.delete_by_id(HERO_SLIDES_TABLE, id).await
    }

    /// Items featured in one section by position
    pub async fn featured(
        &self,
        section: FeaturedSection,
    ) -> Result<Vec<FeaturedSelection>, ContentError> {
        let filter = Filter::eq("section", section.as_str());
        self.list_ordered(FEATURED_CONTENT_TABLE, Some(&filter))
            .await
    }

    pub async fn save_featured(
        &self,
        selection: &FeaturedSelection,
    ) -> Result<FeaturedSelection, ContentError> {
        self.save(FEATURED_CONTENT_TABLE, selection).await
    }

    pub async fn remove_featured(&self, id: &str) -> Result<bool, ContentError> {
        self.delete_by_id(FEATURED_CONTENT_TABLE, id).await
    }

    /// Layout of one page by position, hidden sections included
    pub async fn page_sections(&self, page: &str) -> Result<Vec<PageSection>, ContentError> {
        self.list_ordered(PAGE_SECTIONS_TABLE, Some(&Filter::eq("page", page)))
            .await
    }

    pub async fn save_page_section(
        &self,
        section: &PageSection,
    ) -> Result<PageSection, ContentError> {
        self.save(PAGE_SECTIONS_TABLE, section).await
    }

    pub async fn delete_page_section(&self, id: &str) -> Result<bool, ContentError> {
        self.delete_by_id(PAGE_SECTIONS_TABLE, id).await
    }

    /// Button overrides declared by a page's visible sections
    ///
    /// Each section may carry `settings.buttons`; later sections override earlier ones per
    /// variant. Malformed overrides are skipped.
    pub async fn page_styles(&self, page: &str) -> Result<PageStyles, ContentError> {
        let mut styles = PageStyles::default();
        for section in self.page_sections(page).await? {
            if !section.is_visible {
                continue;
            }
            let Some(buttons) = section.settings.get("buttons") else {
                continue;
            };
            match serde_json::from_value::<PageStyles>(serde_json::json!({ "buttons": buttons })) {
                Ok(declared) => styles.buttons.extend(declared.buttons),
                Err(err) => log::warn!(
                    "Ignoring button overrides in section '{}': {}",
                    section.id,
                    err
                ),
            }
        }
        Ok(styles)
    }
}
