//! Job listings as a single table-style bubble.

use crate::catalog::JobPosting;
use crate::line::message::{Action, Bubble, FlexBox, FlexButton, FlexText, Message};

use super::LISTINGS_ALT_TEXT;

/// One bubble: a "Job Listings" header, then a Title/Location/Website row
/// followed by one row per job with a link button.
pub fn job_table(jobs: &[JobPosting]) -> Message {
    let header = FlexBox::horizontal().push(FlexText::new("Job Listings").bold().size("lg"));

    let column_titles = FlexBox::horizontal()
        .margin("lg")
        .push(FlexText::new("Title").bold().size("sm"))
        .push(FlexText::new("Location").bold().size("sm"))
        .push(FlexText::new("Website").bold().size("sm"));

    let body = jobs.iter().fold(
        FlexBox::vertical().separator().push(column_titles),
        |body, job| body.push(job_row(job)),
    );

    Message::flex(
        LISTINGS_ALT_TEXT,
        Bubble::new().size("giga").header(header).body(body),
    )
}

fn job_row(job: &JobPosting) -> FlexBox {
    FlexBox::horizontal()
        .margin("lg")
        .push(FlexText::new(&job.title).margin("sm").size("sm").wrap())
        .push(FlexText::new(&job.location).margin("sm").size("sm").wrap())
        .push(
            FlexButton::new(Action::uri("Link", &job.url))
                .style("primary")
                .height("sm")
                .margin("25px"),
        )
}
