//! Ad-platform export normalization.

use crate::coerce::{coerce_date, coerce_number};
use crate::resolve::FieldResolver;
use crate::types::{AdRecord, AdmissionStats, DeliveryLevel, RawRow};

use super::{fold_outcomes, SkipReason};

// Accepted header spellings per logical field, most specific first.
const DATE: &[&str] = &["Reporting ends", "Date", "Reporting date"];
const DELIVERY_LEVEL: &[&str] = &["Delivery level", "Delivery Level"];
const CAMPAIGN_NAME: &[&str] = &["Campaign name", "Campaign"];
const ADSET_NAME: &[&str] = &["Ad Set Name", "Ad set name"];
const AD_NAME: &[&str] = &["Ad name"];
const SPEND_SGD: &[&str] = &["Amount spent (SGD)", "Amount Spent (SGD)"];
const SPEND_BDT: &[&str] = &["Amount spent (BDT)"];
const CONVERSATIONS: &[&str] = &["Messaging conversations started"];
const RESULTS: &[&str] = &["Results"];
const IMPRESSIONS: &[&str] = &["Impressions"];
const CTR_ALL: &[&str] = &["CTR (all)"];
const FREQUENCY: &[&str] = &["Frequency"];

/// Campaign/ad-set name fragments marking cold-audience acquisition.
const COLD_KEYWORDS: &[&str] = &["prospecting", "cold", "broad"];
/// Fragments marking warm/retargeting traffic; any hit overrides cold.
const WARM_KEYWORDS: &[&str] = &["remarketing", "retarget", "rmk", "retargeting", "rm"];

/// Pseudo-rows the export appends below the data; never records.
const SUMMARY_NAMES: &[&str] = &["total", "grand total"];

/// Normalize an ads source, returning emitted records plus statistics.
pub fn normalize_ads_rows(rows: &[RawRow], currency_rate: f64) -> (Vec<AdRecord>, AdmissionStats) {
    fold_outcomes(rows.iter().map(|row| normalize_ad_row(row, currency_rate)))
}

/// Normalize one raw ad-platform row.
///
/// `currency_rate` converts the platform's native SGD spend into BDT. Rows
/// whose delivery level is not campaign get `spend_bdt` and `conversations`
/// zeroed — exports repeat aggregate figures at every level, and only the
/// campaign row's are trustworthy.
pub fn normalize_ad_row(row: &RawRow, currency_rate: f64) -> Result<AdRecord, SkipReason> {
    let fields = FieldResolver::new(row);

    let date = fields
        .resolve(DATE)
        .and_then(coerce_date)
        .ok_or(SkipReason::UnparseableDate)?;
    let campaign_name = fields
        .resolve_text(CAMPAIGN_NAME)
        .ok_or(SkipReason::MissingCampaignName)?;
    if SUMMARY_NAMES.contains(&campaign_name.to_lowercase().as_str()) {
        return Err(SkipReason::SummaryRow);
    }

    let adset_name = fields.resolve_text(ADSET_NAME).unwrap_or_default();
    let ad_name = fields.resolve_text(AD_NAME).unwrap_or_default();
    let delivery_level =
        DeliveryLevel::from_raw(&fields.resolve_text(DELIVERY_LEVEL).unwrap_or_default());
    let is_campaign_row = delivery_level.is_campaign();

    // Prefer the SGD-denominated column (converted); fall back to a direct
    // BDT column.
    let spend_bdt = match fields.resolve(SPEND_SGD).and_then(coerce_number) {
        Some(sgd) => sgd * currency_rate,
        None => fields
            .resolve(SPEND_BDT)
            .and_then(coerce_number)
            .unwrap_or(0.0),
    };
    let conversations = fields
        .resolve(CONVERSATIONS)
        .and_then(coerce_number)
        .or_else(|| fields.resolve(RESULTS).and_then(coerce_number));

    Ok(AdRecord {
        date,
        is_prospecting: infer_prospecting(&campaign_name, &adset_name),
        campaign_name,
        adset_name,
        ad_name,
        delivery_level,
        spend_bdt: if is_campaign_row { spend_bdt } else { 0.0 },
        impressions: fields.resolve(IMPRESSIONS).and_then(coerce_number),
        ctr_all: fields.resolve(CTR_ALL).and_then(coerce_number),
        frequency: fields.resolve(FREQUENCY).and_then(coerce_number),
        conversations: if is_campaign_row {
            conversations
        } else {
            Some(0.0)
        },
    })
}

/// Classify cold-traffic (prospecting) rows from campaign/ad-set naming.
///
/// True iff the lowercased concatenation contains a cold keyword and no
/// warm keyword — warm matches force false regardless of cold matches.
fn infer_prospecting(campaign_name: &str, adset_name: &str) -> bool {
    let haystack = format!("{campaign_name} {adset_name}").to_lowercase();
    COLD_KEYWORDS.iter().any(|k| haystack.contains(k))
        && !WARM_KEYWORDS.iter().any(|k| haystack.contains(k))
}
