//! Products Data

use crate::domain::{
    categories::records::CategoryUuid,
    products::records::{AttributeValues, ProductRecord, ProductUuid},
    users::records::UserUuid,
};

pub const DEFAULT_PAGE_SIZE: i64 = 12;
pub const MAX_PAGE_SIZE: i64 = 100;

/// New product payload from a supplier.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub attributes: AttributeValues,
}

/// Full-replace edit payload. `expected_version` is the version the
/// client last read; a mismatch means someone else wrote in between.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub attributes: AttributeValues,
    pub expected_version: i64,
}

/// New product persistence payload with identity and ownership resolved.
#[derive(Debug, Clone)]
pub struct NewProductRecord {
    pub uuid: ProductUuid,
    pub supplier_uuid: UserUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub attributes: AttributeValues,
    pub active: bool,
}

/// Resolved column values for a versioned update.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub attributes: AttributeValues,
    pub active: bool,
}

/// Catalog listing filter. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
    pub supplier: Option<UserUuid>,
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    pub min_price_minor: Option<i64>,
    pub max_price_minor: Option<i64>,
    pub page: i64,
    pub limit: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            supplier: None,
            search: None,
            min_price_minor: None,
            max_price_minor: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductFilter {
    /// Clamp page and limit to sane bounds.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of catalog results with the unpaged total.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: i64,
    pub active: i64,
}

/// Admin status change payload.
#[derive(Debug, Clone, Copy)]
pub struct StatusChange {
    pub product: ProductUuid,
    pub active: bool,
    pub expected_version: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_normalization_clamps_bounds() {
        let filter = ProductFilter {
            page: 0,
            limit: 10_000,
            ..ProductFilter::default()
        }
        .normalized();

        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, MAX_PAGE_SIZE);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn offset_is_zero_based() {
        let filter = ProductFilter {
            page: 3,
            limit: 12,
            ..ProductFilter::default()
        };

        assert_eq!(filter.offset(), 24);
    }
}
