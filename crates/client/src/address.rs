use serde::{Deserialize, Serialize};

use storefront_core::AddressId;

/// A saved shipping address (`GET /user/addresses`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: AddressId,
    pub address: String,
}

/// Body of `POST /user/addresses`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewAddress<'a> {
    pub address: &'a str,
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}  {}", self.id, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape() {
        let address: Address =
            serde_json::from_str(r#"{"_id":"a1","address":"221B Baker Street"}"#).unwrap();
        assert_eq!(address.id.as_str(), "a1");
        assert_eq!(address.to_string(), "a1  221B Baker Street");
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(serde_json::from_str::<Address>(r#"{"_id":" ","address":"x"}"#).is_err());
    }
}
