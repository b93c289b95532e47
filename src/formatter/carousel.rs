//! Job listings as a horizontal carousel, one bubble per job.

use tracing::warn;

use crate::catalog::JobPosting;
use crate::line::message::{Action, Bubble, Carousel, FlexBox, FlexButton, FlexText, Message};

use super::{LISTINGS_ALT_TEXT, NO_JOBS};

const LINK_COLOR: &str = "#3b8132";

/// Build the carousel. Each bubble links to the detail page for its catalog
/// index when `detail_base` is set.
pub fn job_carousel(jobs: &[JobPosting], detail_base: Option<&str>) -> Message {
    if jobs.is_empty() {
        return Message::text(NO_JOBS);
    }
    if jobs.len() > Carousel::MAX_BUBBLES {
        warn!(
            total = jobs.len(),
            shown = Carousel::MAX_BUBBLES,
            "Catalog larger than a carousel, truncating"
        );
    }

    let bubbles = jobs
        .iter()
        .take(Carousel::MAX_BUBBLES)
        .enumerate()
        .map(|(index, job)| job_bubble(index, job, detail_base))
        .collect();

    Message::flex(LISTINGS_ALT_TEXT, Carousel::new(bubbles))
}

fn job_bubble(index: usize, job: &JobPosting, detail_base: Option<&str>) -> Bubble {
    let header = FlexBox::horizontal().push(FlexText::new(&job.title).bold().size("lg").wrap());

    let body = FlexBox::vertical()
        .separator()
        .push(detail_line(FlexText::new(&job.location)))
        .push(detail_line(FlexText::new(job.summary())))
        .push(detail_line(
            FlexText::new(&job.url)
                .action(Action::uri("Link", &job.url))
                .color(LINK_COLOR),
        ));

    let bubble = Bubble::new().size("giga").header(header).body(body);

    match detail_base {
        Some(base) => bubble.footer(
            FlexBox::vertical().push(
                FlexButton::new(Action::uri("Details", detail_url(base, index)))
                    .style("primary")
                    .height("sm"),
            ),
        ),
        None => bubble,
    }
}

fn detail_line(text: FlexText) -> FlexBox {
    FlexBox::horizontal()
        .margin("md")
        .push(text.margin("sm").size("sm").wrap())
}

/// URL of the detail page for a catalog index.
pub fn detail_url(base: &str, index: usize) -> String {
    format!("{}/jobs/{index}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn one_bubble_per_job() {
        let catalog = sample_catalog();
        let value = serde_json::to_value(job_carousel(catalog.jobs(), None)).unwrap();

        assert_eq!(value["altText"], "Job Listings");
        assert_eq!(value["contents"]["type"], "carousel");
        let bubbles = value["contents"]["contents"].as_array().unwrap();
        assert_eq!(bubbles.len(), catalog.len());

        for (bubble, job) in bubbles.iter().zip(catalog.jobs()) {
            assert_eq!(bubble["header"]["contents"][0]["text"], job.title.as_str());
            let body = &bubble["body"]["contents"];
            assert_eq!(body[1]["contents"][0]["text"], job.location.as_str());
            assert_eq!(body[2]["contents"][0]["text"], job.summary());
            assert_eq!(body[3]["contents"][0]["action"]["uri"], job.url.as_str());
            assert_eq!(body[3]["contents"][0]["color"], LINK_COLOR);
            assert!(bubble.get("footer").is_none());
        }
    }

    #[test]
    fn detail_buttons_address_catalog_index() {
        let catalog = sample_catalog();
        let value =
            serde_json::to_value(job_carousel(catalog.jobs(), Some("https://bot.example.com/")))
                .unwrap();

        let bubbles = value["contents"]["contents"].as_array().unwrap();
        for (index, bubble) in bubbles.iter().enumerate() {
            assert_eq!(
                bubble["footer"]["contents"][0]["action"]["uri"],
                format!("https://bot.example.com/jobs/{index}")
            );
        }
    }

    #[test]
    fn truncates_to_carousel_limit() {
        let job = sample_catalog().jobs()[0].clone();
        let jobs = vec![job; Carousel::MAX_BUBBLES + 3];
        let value = serde_json::to_value(job_carousel(&jobs, None)).unwrap();
        assert_eq!(
            value["contents"]["contents"].as_array().unwrap().len(),
            Carousel::MAX_BUBBLES
        );
    }

    #[test]
    fn empty_catalog_is_text() {
        assert_eq!(job_carousel(&[], None), Message::text(NO_JOBS));
    }
}
