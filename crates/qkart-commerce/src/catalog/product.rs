//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product in the catalog.
///
/// Immutable once fetched; a catalog snapshot lives for one page view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category label used by search.
    pub category: String,
    /// Unit cost.
    #[serde(with = "crate::money::non_negative")]
    pub cost: Money,
    /// Star rating.
    pub rating: Rating,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a product with an empty image reference.
    ///
    /// Ratings above five are clamped.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        cost: Money,
        rating: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cost,
            rating: Rating::clamped(rating),
            image: String::new(),
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// A 0-5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Highest possible rating.
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values above [`Rating::MAX`].
    pub fn new(stars: u8) -> Result<Self, CommerceError> {
        if stars > Self::MAX {
            return Err(CommerceError::InvalidRating(stars));
        }
        Ok(Self(stars))
    }

    /// Create a rating, clamping values above [`Rating::MAX`].
    pub fn clamped(stars: u8) -> Self {
        Self(stars.min(Self::MAX))
    }

    /// Number of stars.
    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CommerceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    /// Renders filled and empty stars, e.g. "★★★☆☆".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..Self::MAX {
            let star = if i < self.0 { '\u{2605}' } else { '\u{2606}' };
            write!(f, "{star}")?;
        }
        Ok(())
    }
}
