//! Presentation seam.
//!
//! Handlers hand shaped query results to a [`Renderer`]. The built-in
//! [`EmbeddedJsonRenderer`] writes a bare HTML page and embeds the data as a
//! JSON block for the browser-side plotting scripts to read.

use serde::Serialize;
use soc_db::{Row, StudyDetail};

use crate::error::WebError;

/// Element id of the embedded JSON data block.
pub const DATA_ELEMENT_ID: &str = "soc-data";

/// Turns shaped study data into an HTML document.
pub trait Renderer: Send + Sync {
    fn render_index(&self, studies: &[Row]) -> Result<String, WebError>;

    fn render_study(&self, detail: &StudyDetail) -> Result<String, WebError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedJsonRenderer;

#[derive(Serialize)]
struct IndexData<'a> {
    studies: &'a [Row],
}

impl Renderer for EmbeddedJsonRenderer {
    fn render_index(&self, studies: &[Row]) -> Result<String, WebError> {
        let mut body = String::from("<h1>Studies</h1>\n<ul>\n");
        for study in studies {
            let curated = study
                .get("curated_study_number")
                .map(|v| v.to_label())
                .unwrap_or_default();
            let curated = escape_html(&curated);
            body.push_str(&format!(
                "<li><a href=\"/study/{curated}.html\">{curated}</a></li>\n"
            ));
        }
        body.push_str("</ul>\n");

        let data = script_json(&IndexData { studies })?;
        Ok(page("Studies", &body, &data))
    }

    fn render_study(&self, detail: &StudyDetail) -> Result<String, WebError> {
        let curated = detail
            .study
            .get("curated_study_number")
            .map(|v| v.to_label())
            .unwrap_or_default();
        let title = format!("Study {curated}");
        let body = format!(
            "<h1>{}</h1>\n<p>{} treatments, {} tumor measurements, {} animals</p>\n",
            escape_html(&title),
            detail.treatments.len(),
            detail.measurements.len(),
            detail.animals.len(),
        );

        let data = script_json(detail)?;
        Ok(page(&title, &body, &data))
    }
}

fn page(title: &str, body: &str, data: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}<script type=\"application/json\" id=\"{DATA_ELEMENT_ID}\">{data}</script>\n</body>\n</html>\n",
        escape_html(title),
    )
}

/// Serialize `value` for a `<script>` element. `</` is written as `<\/`,
/// which JSON reads back unchanged.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, WebError> {
    let json = serde_json::to_string(value).map_err(|e| WebError::render(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
