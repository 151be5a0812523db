use crate::utils::error::{HarvestError, Result};
use chrono::{Datelike, NaiveDate};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HarvestError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Cross-field check for an inclusive date range. `NaiveDate` parsing has
/// already rejected calendar-impossible days; what is left is pairing,
/// ordering, and that both endpoints fall inside the conference year.
pub fn validate_date_range(
    field_name: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    year: i32,
) -> Result<()> {
    match (start, end) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) => {
            if start > end {
                return Err(HarvestError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: format!("{} .. {}", start, end),
                    reason: "start date is after end date".to_string(),
                });
            }
            if start.year() != year || end.year() != year {
                return Err(HarvestError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: format!("{} .. {}", start, end),
                    reason: format!("date range must fall within {}", year),
                });
            }
            Ok(())
        }
        _ => Err(HarvestError::MissingConfigError {
            field: format!("{} (start and end dates must be given together)", field_name),
        }),
    }
}
