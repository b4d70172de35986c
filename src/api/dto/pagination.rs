//! Page-based listing: `?page=&page_size=` in, a `pagination` block out.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use std::ops::RangeInclusive;

use crate::error::AppError;

const DEFAULT_PAGE_SIZE: u32 = 25;
const PAGE_SIZE_RANGE: RangeInclusive<u32> = 1..=200;

/// Raw query parameters. Query strings carry numbers as text, hence
/// `DisplayFromStr`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// A checked page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn offset(&self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn meta(&self, total_items: i64) -> PaginationMeta {
        let total_pages = (total_items.max(0) as u64).div_ceil(u64::from(self.size)) as u32;
        PaginationMeta {
            page: self.number,
            page_size: self.size,
            total_items,
            total_pages,
        }
    }
}

impl TryFrom<PaginationParams> for Page {
    type Error = AppError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let number = params.page.unwrap_or(1);
        let size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if number == 0 {
            return Err(AppError::bad_request(
                "Invalid pagination",
                json!({ "page": "must be at least 1" }),
            ));
        }
        if !PAGE_SIZE_RANGE.contains(&size) {
            return Err(AppError::bad_request(
                "Invalid pagination",
                json!({
                    "page_size": format!(
                        "must be between {} and {}",
                        PAGE_SIZE_RANGE.start(),
                        PAGE_SIZE_RANGE.end()
                    )
                }),
            ));
        }

        Ok(Page { number, size })
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}
