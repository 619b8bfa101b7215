use crate::core::display::{build_cards, BusynessView, PlaceCard, Severity};
use crate::domain::model::{RankedResultSet, Trend};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

const BAR_WIDTH: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render<W: Write>(
    format: OutputFormat,
    query: &str,
    ranked: &RankedResultSet,
    writer: &mut W,
) -> Result<()> {
    let cards = build_cards(ranked);
    match format {
        OutputFormat::Text => render_text(query, &cards, writer),
        OutputFormat::Json => render_json(query, ranked.max_round_trip_minutes, &cards, writer),
        OutputFormat::Csv => render_csv(&cards, writer),
    }
}

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        "-".repeat((BAR_WIDTH - filled) as usize)
    )
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Neutral => "",
        Severity::Low => "short",
        Severity::Medium => "medium",
        Severity::High => "long",
    }
}

pub fn render_text<W: Write>(query: &str, cards: &[PlaceCard], writer: &mut W) -> Result<()> {
    writeln!(writer, "Results for \"{}\"", query)?;
    writeln!(writer)?;

    if cards.is_empty() {
        writeln!(writer, "No places found")?;
        writeln!(
            writer,
            "Try searching for something else or check your location"
        )?;
        return Ok(());
    }

    for card in cards {
        writeln!(writer, "{}  ({})", card.name, card.rating_label)?;
        writeln!(writer, "  {}", card.address)?;
        if let Some(distance) = &card.distance_label {
            writeln!(writer, "  {}", distance)?;
        }

        match &card.busyness {
            BusynessView::Unavailable => writeln!(writer, "  Busyness: Data unavailable")?,
            BusynessView::Known {
                percent,
                label,
                bar_width,
                ..
            } => {
                let trend = match card.trend {
                    Some(Trend::Increasing) => " (increasing)",
                    Some(Trend::Decreasing) => " (decreasing)",
                    None => "",
                };
                writeln!(
                    writer,
                    "  Busyness: {} {}% {}{}",
                    label,
                    percent,
                    bar(*bar_width),
                    trend
                )?;
                if let Some(peaks) = &card.peak_hours {
                    writeln!(writer, "  Peak hours: {}", peaks)?;
                }
            }
        }

        let fill = bar(card.round_trip_fill.unwrap_or(0));
        let severity = severity_label(card.round_trip_severity);
        if severity.is_empty() {
            writeln!(writer, "  Round trip: {} {}", card.round_trip_label, fill)?;
        } else {
            writeln!(
                writer,
                "  Round trip: {} {} {}",
                card.round_trip_label, fill, severity
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    max_round_trip_minutes: u32,
    places: &'a [PlaceCard],
}

pub fn render_json<W: Write>(
    query: &str,
    max_round_trip_minutes: u32,
    cards: &[PlaceCard],
    writer: &mut W,
) -> Result<()> {
    let report = JsonReport {
        query,
        max_round_trip_minutes,
        places: cards,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    rating: &'a str,
    busyness_percent: Option<i64>,
    busyness_label: &'a str,
    peak_hours: &'a str,
    round_trip: &'a str,
    round_trip_minutes: Option<u32>,
    round_trip_fill: Option<u32>,
    round_trip_severity: Severity,
}

pub fn render_csv<W: Write>(cards: &[PlaceCard], writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for card in cards {
        let (busyness_percent, busyness_label) = match &card.busyness {
            BusynessView::Known { percent, label, .. } => (Some(*percent), *label),
            BusynessView::Unavailable => (None, "Data unavailable"),
        };
        csv_writer.serialize(CsvRow {
            id: &card.id,
            name: &card.name,
            address: &card.address,
            rating: &card.rating_label,
            busyness_percent,
            busyness_label,
            peak_hours: card.peak_hours.as_deref().unwrap_or(""),
            round_trip: &card.round_trip_label,
            round_trip_minutes: card.round_trip_minutes,
            round_trip_fill: card.round_trip_fill,
            round_trip_severity: card.round_trip_severity,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
