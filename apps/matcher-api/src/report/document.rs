//! Report content: what goes on the page, in what order.

use crate::models::MatchResult;
use crate::report::layout::{Align, Block, Rgb, Table};
use crate::report::metrics::Font;
use crate::scoring::scorer::{EDUCATION_WEIGHT, EXPERIENCE_WEIGHT, SKILL_WEIGHT};

pub const REPORT_TITLE: &str = "CV and Job Description Match Report";

/// Column widths (pt) of the score summary table; they sum to the text width.
const SUMMARY_COLUMNS: [f32; 4] = [126.0, 90.0, 60.0, 192.0];

pub fn build_report(result: &MatchResult) -> Vec<Block> {
    let score = &result.score_breakdown;
    let candidate = &result.candidate;
    let job = &result.job;

    let mut blocks = vec![
        Block::Heading {
            text: REPORT_TITLE.to_string(),
            size: 18.0,
            color: Rgb::DARK_BLUE,
            align: Align::Center,
        },
        Block::Spacer(20.0),
        paragraph(format!(
            "Generated on: {}",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        Block::Spacer(20.0),
        Block::Heading {
            text: format!("Overall Match Score: {}/100", score.total_score),
            size: 14.0,
            color: Rgb::DARK_GREEN,
            align: Align::Left,
        },
        paragraph(format!("Interpretation: {}", result.interpretation)),
        Block::Spacer(20.0),
        section("Score Breakdown"),
        Block::Table(Table {
            column_widths: SUMMARY_COLUMNS.to_vec(),
            header: cells(&["Category", "Score", "Weight", "Details"]),
            rows: vec![
                vec![
                    "Skills Match".to_string(),
                    format!("{:.1}/{}", score.skill_score, SKILL_WEIGHT),
                    percent(SKILL_WEIGHT),
                    format!(
                        "{}/{} skills matched",
                        score.skill_match_count, score.required_skill_count
                    ),
                ],
                vec![
                    "Education Match".to_string(),
                    format!("{:.1}/{}", score.education_score, EDUCATION_WEIGHT),
                    percent(EDUCATION_WEIGHT),
                    if score.education_match_found {
                        "Relevant education found"
                    } else {
                        "No relevant education"
                    }
                    .to_string(),
                ],
                vec![
                    "Experience Match".to_string(),
                    format!("{:.1}/{}", score.experience_score, EXPERIENCE_WEIGHT),
                    percent(EXPERIENCE_WEIGHT),
                    if score.experience_match_found {
                        "Relevant experience found"
                    } else {
                        "No relevant experience"
                    }
                    .to_string(),
                ],
            ],
        }),
        Block::Spacer(20.0),
        section("Candidate Information"),
        Block::Field {
            label: "Name:".to_string(),
            value: candidate.name.clone(),
        },
        Block::Spacer(10.0),
    ];

    push_list(&mut blocks, "Skills:", &candidate.skills);
    push_list(&mut blocks, "Education:", &candidate.education);
    push_list(&mut blocks, "Experience:", &candidate.experience);
    blocks.push(Block::Spacer(10.0));

    blocks.push(section("Job Requirements"));
    push_list(&mut blocks, "Required Skills:", &job.required_skills);
    push_list(&mut blocks, "Qualifications:", &job.qualifications);
    blocks.push(Block::Field {
        label: "Experience Needed:".to_string(),
        value: job.experience_needed.clone(),
    });

    blocks
}

fn section(title: &str) -> Block {
    Block::Heading {
        text: title.to_string(),
        size: 14.0,
        color: Rgb::BLACK,
        align: Align::Left,
    }
}

fn paragraph(text: String) -> Block {
    Block::Paragraph {
        text,
        font: Font::Regular,
        size: 10.0,
    }
}

fn push_list(blocks: &mut Vec<Block>, label: &str, items: &[String]) {
    blocks.push(Block::Paragraph {
        text: label.to_string(),
        font: Font::Bold,
        size: 10.0,
    });
    blocks.extend(items.iter().map(|item| Block::Bullet(item.clone())));
    blocks.push(Block::Spacer(10.0));
}

fn cells(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn percent(weight: f64) -> String {
    format!("{weight}%")
}
