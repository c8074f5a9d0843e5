//! The normalization pipeline: a single-pass, order-dependent batch
//! transform over an in-memory [`Table`]. Later stages depend on the
//! renames and fills performed by earlier stages.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{AvailabilityRule, FeedConfig, ImagePolicy};
use crate::errors::Result;
use crate::schema;
use crate::table::Table;

/// A row excluded from the output because its price never resolved to a
/// number. `row_index` is the zero-based data-row position at the time
/// the price stage ran, i.e. after image distribution.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedRow {
    pub row_index: usize,
    pub price: String,
}

#[derive(Debug)]
pub struct NormalizeOutcome {
    pub table: Table,
    pub dropped: Vec<DroppedRow>,
}

/// Runs the full pipeline. A missing required column aborts the whole
/// run with no partial output; rows whose price is unparseable after
/// all fills are excluded and reported through the outcome.
pub fn normalize(mut table: Table, config: &FeedConfig) -> Result<NormalizeOutcome> {
    for column in schema::REQUIRED_COLUMNS {
        table.require_column(column)?;
    }
    let rows_in = table.height();

    map_columns(&mut table);
    fill_sparse_columns(&mut table, config)?;
    derive_links(&mut table, config)?;
    normalize_availability(&mut table, config)?;
    distribute_images(&mut table, config)?;
    let dropped = format_prices(&mut table, config)?;
    enrich(&mut table, config);

    info!(
        rows_in,
        rows_out = table.height(),
        dropped = dropped.len(),
        "catalog normalized"
    );

    Ok(NormalizeOutcome { table, dropped })
}

fn map_columns(table: &mut Table) {
    for (source, canonical) in schema::canonical_renames() {
        table.rename_column(source, canonical);
    }
}

fn fill_sparse_columns(table: &mut Table, config: &FeedConfig) -> Result<()> {
    for column in [
        schema::ITEM_GROUP_ID,
        schema::TITLE_FIELD,
        schema::DESCRIPTION_FIELD,
        schema::PRODUCT_PAGE,
        schema::LINK,
    ] {
        let index = table.require_column(column)?;
        table.forward_fill(index);
    }

    // Extra sparse columns are passthrough metadata; absent ones are
    // simply skipped.
    for column in &config.extra_sparse_columns {
        if let Some(index) = table.column(column) {
            table.forward_fill(index);
        }
    }

    Ok(())
}

/// `link = domain + "/" + slug + "/" + rawLink`, computed after the slug
/// and raw-link columns were themselves forward-filled. A blank slug or
/// raw value yields a blank link, resolved by a second fill pass. The
/// slug column is consumed here and removed from the table.
fn derive_links(table: &mut Table, config: &FeedConfig) -> Result<()> {
    let slug_index = table.require_column(schema::PRODUCT_PAGE)?;
    let link_index = table.require_column(schema::LINK)?;

    for row in &mut table.rows {
        let slug = row[slug_index].trim().to_string();
        let raw = row[link_index].trim().to_string();
        row[link_index] = if slug.is_empty() || raw.is_empty() {
            String::new()
        } else {
            format!("{}/{}/{}", config.domain, slug, raw)
        };
    }

    table.forward_fill(link_index);
    table.remove_column(slug_index);
    Ok(())
}

/// Parses stock counts and classifies them. A cell that does not parse
/// is a missing value, not an error; the configured rule resolves it
/// before classification. Negative counts classify as out of stock.
fn normalize_availability(table: &mut Table, config: &FeedConfig) -> Result<()> {
    let index = table.require_column(schema::AVAILABILITY)?;
    let mut last_stock: Option<f64> = None;

    for row in &mut table.rows {
        let stock = match row[index].trim().parse::<f64>() {
            Ok(value) => {
                last_stock = Some(value);
                value
            }
            Err(_) => match config.availability_rule {
                AvailabilityRule::ForwardFill => last_stock.unwrap_or(0.0),
                AvailabilityRule::ZeroDefault => 0.0,
            },
        };

        row[index] = if stock >= 1.0 {
            schema::AVAILABILITY_IN_STOCK
        } else {
            schema::AVAILABILITY_OUT_OF_STOCK
        }
        .to_string();
    }

    Ok(())
}

/// Distributes space-separated image URLs according to the configured
/// policy, then forward-fills cells that are still blank.
fn distribute_images(table: &mut Table, config: &FeedConfig) -> Result<()> {
    let index = table.require_column(schema::IMAGE_LINK)?;

    match config.image_policy {
        ImagePolicy::Explode => {
            let mut exploded = Vec::with_capacity(table.rows.len());
            for mut row in table.rows.drain(..) {
                let urls: Vec<String> = row[index]
                    .split(' ')
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect();
                if urls.len() <= 1 {
                    row[index] = urls.into_iter().next().unwrap_or_default();
                    exploded.push(row);
                } else {
                    for url in urls {
                        let mut copy = row.clone();
                        copy[index] = url;
                        exploded.push(copy);
                    }
                }
            }
            table.rows = exploded;
        }
        ImagePolicy::FirstOnly => {
            for row in &mut table.rows {
                let first = row[index]
                    .split(' ')
                    .find(|url| !url.is_empty())
                    .map(str::to_string)
                    .unwrap_or_default();
                row[index] = first;
            }
        }
    }

    table.forward_fill(index);
    Ok(())
}

/// Formats every price as a two-decimal amount with the currency code
/// appended. Rows whose price does not parse are dropped from the
/// output and reported; price is never forward-filled.
fn format_prices(table: &mut Table, config: &FeedConfig) -> Result<Vec<DroppedRow>> {
    let index = table.require_column(schema::PRICE_FIELD)?;
    let mut dropped = Vec::new();
    let mut kept = Vec::with_capacity(table.rows.len());

    for (row_index, mut row) in table.rows.drain(..).enumerate() {
        match row[index].trim().parse::<f64>() {
            Ok(amount) => {
                row[index] = format!("{amount:.2}{}", config.currency);
                kept.push(row);
            }
            Err(_) => {
                debug!(row_index, price = %row[index], "dropping row with unparseable price");
                dropped.push(DroppedRow {
                    row_index,
                    price: row[index].clone(),
                });
            }
        }
    }

    table.rows = kept;
    Ok(dropped)
}

fn enrich(table: &mut Table, config: &FeedConfig) {
    if let Some(category) = &config.google_product_category {
        table.push_column(schema::GOOGLE_PRODUCT_CATEGORY, category);
    }
    if config.set_condition {
        table.push_column(schema::CONDITION, schema::CONDITION_NEW);
    }
}
