use super::parse_percentage;
use crate::domain::{PredictionResult, UNKNOWN_LABEL};
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const LABEL_ATTRIBUTE: &str = "data-label";
const CONFIDENCE_ATTRIBUTE: &str = "data-confidence";

/// Scrapes the legacy result page into the canonical record.
///
/// Extraction is best effort: a missing element yields the field default,
/// never an error. The legacy page carries no probabilities or treatment data.
pub fn from_html(document: &str, base_url: &Url, received_at: DateTime<Utc>) -> PredictionResult {
    let html = Html::parse_document(document);

    PredictionResult {
        label: label(&html),
        confidence: confidence(&html),
        image_url: image_url(&html, base_url),
        ..PredictionResult::unknown(received_at)
    }
}

fn label(html: &Html) -> String {
    if let Some(element) = select_first(html, "[data-label]") {
        return text_or_attribute(element, LABEL_ATTRIBUTE)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
    }

    select_first(html, "h2")
        .and_then(element_text)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

fn confidence(html: &Html) -> f64 {
    select_first(html, "[data-confidence]")
        .or_else(|| select_first(html, ".confidence"))
        .and_then(|element| text_or_attribute(element, CONFIDENCE_ATTRIBUTE))
        .map(|text| parse_percentage(&text))
        .unwrap_or(0.0)
}

fn image_url(html: &Html, base_url: &Url) -> String {
    let Some(src) = select_first(html, r#"img[src*="uploads"]"#)
        .and_then(|element| element.value().attr("src"))
        .map(str::trim)
    else {
        return String::new();
    };

    base_url
        .join(src)
        .map(String::from)
        .unwrap_or_else(|_| src.to_string())
}

fn select_first<'a>(html: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    html.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

fn text_or_attribute(element: ElementRef<'_>, attribute: &str) -> Option<String> {
    element_text(element).or_else(|| {
        element
            .value()
            .attr(attribute)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}
