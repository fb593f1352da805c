use serde::{Deserialize, Serialize};

use crate::series::{EVENING_SLOT, LATE_SLOT};
use crate::tables::ReferenceTables;
use crate::types::{CloudCategory, IndexError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarAdvisory {
    pub cloud: CloudCategory,
    pub advisory: String,
}

/// Stargazing outlook from 20:00 and from 23:00
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightSky {
    pub evening: StarAdvisory,
    pub late: StarAdvisory,
}

pub fn stargazing_outlook(tables: &ReferenceTables, clouds: &[CloudCategory]) -> Result<NightSky, IndexError> {
    let at = |slot: usize| -> Result<StarAdvisory, IndexError> {
        let cloud = *clouds.get(slot).ok_or_else(|| {
            IndexError::invalid(
                "clouds",
                format!("{} slots given, stargazing needs slot {}", clouds.len(), slot),
            )
        })?;
        Ok(StarAdvisory {
            cloud,
            advisory: tables.stargazing.get(cloud).clone(),
        })
    };

    Ok(NightSky {
        evening: at(EVENING_SLOT)?,
        late: at(LATE_SLOT)?,
    })
}
