//! Address types.

use crate::ids::AddressId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum address length, in characters, after trimming.
pub const MIN_ADDRESS_LEN: usize = 20;

/// Maximum address length, in characters, after trimming.
pub const MAX_ADDRESS_LEN: usize = 128;

/// A saved shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Address ID.
    #[serde(rename = "_id")]
    pub id: AddressId,
    /// Free-text address.
    #[serde(rename = "address")]
    pub text: String,
}

impl Address {
    /// Create a new address.
    pub fn new(id: impl Into<AddressId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Why a candidate address text was rejected locally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressTextError {
    #[error("Address should be at least 20 characters")]
    TooShort { len: usize },

    #[error("Address should be less than 128 characters")]
    TooLong { len: usize },
}

/// Address text that passed the length rules. Holds the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AddressText(String);

impl AddressText {
    /// Trim and validate a candidate address.
    pub fn parse(raw: &str) -> Result<Self, AddressTextError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len < MIN_ADDRESS_LEN {
            return Err(AddressTextError::TooShort { len });
        }
        if len > MAX_ADDRESS_LEN {
            return Err(AddressTextError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for AddressText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The saved addresses plus the client-local selection.
///
/// The selection is never sent to the server until checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    all: Vec<Address>,
    selected: Option<AddressId>,
}

impl AddressBook {
    /// Create a book with no selection.
    pub fn new(all: Vec<Address>) -> Self {
        Self {
            all,
            selected: None,
        }
    }

    /// All saved addresses, in server order.
    pub fn all(&self) -> &[Address] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Replace the list with a fresh server response.
    ///
    /// The selection is dropped if it no longer resolves.
    pub fn replace(&mut self, all: Vec<Address>) {
        self.all = all;
        if let Some(id) = &self.selected {
            if !self.all.iter().any(|a| &a.id == id) {
                self.selected = None;
            }
        }
    }

    /// Select a saved address. Returns false if the id is unknown.
    pub fn select(&mut self, id: &AddressId) -> bool {
        if self.all.iter().any(|a| &a.id == id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The selected id, if any.
    pub fn selected_id(&self) -> Option<&AddressId> {
        self.selected.as_ref()
    }

    /// The selected address, if the selection resolves.
    pub fn selected(&self) -> Option<&Address> {
        let id = self.selected.as_ref()?;
        self.all.iter().find(|a| &a.id == id)
    }

    pub fn is_selected(&self, id: &AddressId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of_len(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn test_address_text_bounds() {
        assert_eq!(
            AddressText::parse(&text_of_len(19)),
            Err(AddressTextError::TooShort { len: 19 })
        );
        assert!(AddressText::parse(&text_of_len(20)).is_ok());
        assert!(AddressText::parse(&text_of_len(128)).is_ok());
        assert_eq!(
            AddressText::parse(&text_of_len(129)),
            Err(AddressTextError::TooLong { len: 129 })
        );
    }

    #[test]
    fn test_address_text_is_trimmed_before_measuring() {
        let padded = format!("   {}\n\t", text_of_len(19));
        assert!(matches!(
            AddressText::parse(&padded),
            Err(AddressTextError::TooShort { len: 19 })
        ));

        let padded = format!("  {}  ", text_of_len(20));
        assert_eq!(AddressText::parse(&padded).unwrap().as_str(), text_of_len(20));
    }

    #[test]
    fn test_address_text_counts_characters() {
        // 20 multi-byte characters
        let text = "\u{00e9}".repeat(20);
        assert!(AddressText::parse(&text).is_ok());
    }

    #[test]
    fn test_address_text_messages() {
        assert_eq!(
            AddressTextError::TooShort { len: 3 }.to_string(),
            "Address should be at least 20 characters"
        );
        assert_eq!(
            AddressTextError::TooLong { len: 300 }.to_string(),
            "Address should be less than 128 characters"
        );
    }

    #[test]
    fn test_address_from_api_json() {
        let list: Vec<Address> = serde_json::from_str(
            r#"[{"_id":"w7UEJB9WbPJvgrQd","address":"Flat 2B, Palm Grove Apartments, Bengaluru"}]"#,
        )
        .unwrap();
        assert_eq!(list[0].id.as_str(), "w7UEJB9WbPJvgrQd");
        assert!(list[0].text.starts_with("Flat 2B"));
    }

    #[test]
    fn test_address_book_selection() {
        let mut book = AddressBook::new(vec![Address::new("a1", "one"), Address::new("a2", "two")]);
        assert!(book.selected().is_none());

        assert!(book.select(&AddressId::new("a2")));
        assert_eq!(book.selected().map(|a| a.text.as_str()), Some("two"));

        assert!(!book.select(&AddressId::new("missing")));
        assert!(book.is_selected(&AddressId::new("a2")));
    }

    #[test]
    fn test_address_book_replace_drops_stale_selection() {
        let mut book = AddressBook::new(vec![Address::new("a1", "one"), Address::new("a2", "two")]);
        book.select(&AddressId::new("a1"));

        book.replace(vec![Address::new("a1", "one"), Address::new("a3", "three")]);
        assert!(book.is_selected(&AddressId::new("a1")));

        book.replace(vec![Address::new("a3", "three")]);
        assert!(book.selected_id().is_none());
    }
}
