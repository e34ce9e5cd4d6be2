// Web font stylesheet URLs

use url::Url;

use super::DomError;
use crate::settings::FontSettings;

/// Weights requested for every family
const FONT_WEIGHTS: &str = "300;400;500;600;700";

/// Stylesheet URL loading every distinct family, or `None` when fonts are disabled
pub fn font_stylesheet_url(base: &str, font: &FontSettings) -> Result<Option<String>, DomError> {
    if !font.enabled {
        return Ok(None);
    }

    let families = font.distinct_families();
    if families.is_empty() {
        return Ok(None);
    }

    let mut url = Url::parse(base).map_err(|err| DomError::FontUrl(format!("{base}: {err}")))?;
    let mut query = families
        .iter()
        .map(|family| {
            let encoded: String = url::form_urlencoded::byte_serialize(family.as_bytes()).collect();
            format!("family={encoded}:wght@{FONT_WEIGHTS}")
        })
        .collect::<Vec<_>>();
    query.push("display=swap".to_string());
    url.set_query(Some(&query.join("&")));

    Ok(Some(url.to_string()))
}
