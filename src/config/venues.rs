//! Venue display names. Explicit configuration handed to the envelope
//! builder instead of module-level tables; an identifier outside the
//! catalog is a configuration error, surfaced before any network call.

use crate::domain::model::Conference;
use crate::utils::error::Result;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct VenueNames {
    /// Conference display name, without the leading year.
    pub conference_name: &'static str,
    pub proceeding_name: &'static str,
    /// Proceeding name as the conference site publishes it, without the
    /// parenthesized abbreviation. Used by the accepted-papers source.
    pub plain_proceeding_name: &'static str,
}

impl VenueNames {
    /// `"2020 IEEE/CVF Conference on ..."` — the year prefix is supplied by
    /// the caller, never derived from parsed content.
    pub fn conference_name_for(&self, year: i32) -> String {
        format!("{} {}", year, self.conference_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VenueCatalog;

impl VenueCatalog {
    pub fn builtin() -> Self {
        VenueCatalog
    }

    /// Resolve a raw identifier, failing fast on anything outside the set.
    pub fn resolve(&self, identifier: &str) -> Result<(Conference, VenueNames)> {
        let conference = Conference::from_str(identifier)?;
        Ok((conference, self.names(conference)))
    }

    pub fn names(&self, conference: Conference) -> VenueNames {
        match conference {
            Conference::Cvpr => VenueNames {
                conference_name:
                    "IEEE/CVF Conference on Computer Vision and Pattern Recognition",
                proceeding_name:
                    "Proceedings of the IEEE/CVF Conference on Computer Vision and Pattern Recognition (CVPR)",
                plain_proceeding_name:
                    "Proceedings of the IEEE/CVF Conference on Computer Vision and Pattern Recognition",
            },
            Conference::Iccv => VenueNames {
                conference_name: "IEEE/CVF International Conference on Computer Vision",
                proceeding_name:
                    "Proceedings of the IEEE/CVF International Conference on Computer Vision (ICCV)",
                plain_proceeding_name:
                    "Proceedings of the IEEE/CVF International Conference on Computer Vision",
            },
            Conference::Wacv => VenueNames {
                conference_name:
                    "IEEE/CVF Winter Conference on Applications of Computer Vision",
                proceeding_name:
                    "Proceedings of the IEEE/CVF Winter Conference on Applications of Computer Vision (WACV)",
                plain_proceeding_name:
                    "Proceedings of the IEEE/CVF Winter Conference on Applications of Computer Vision",
            },
        }
    }
}
