use crate::extract::extract_fields;
use serde::Serialize;
use std::fmt;

/// Column labels of the persisted file, in field order.
pub const HEADER: [&str; 5] = ["Nome", "Endereço", "Bairro", "CEP", "Telefone"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    pub zip_code: String,
    pub phone: String,
}

impl ContactRecord {
    pub fn from_raw(name: &str, raw_address: &str, raw_phone_attr: &str) -> ContactRecord {
        let fields = extract_fields(raw_address, raw_phone_attr);
        ContactRecord {
            name: name.to_string(),
            address: fields.address,
            neighborhood: fields.neighborhood,
            zip_code: fields.zip_code,
            phone: fields.phone,
        }
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name          : {}", self.name)?;
        writeln!(f, "Address       : {}", self.address)?;
        writeln!(f, "Neighborhood  : {}", self.neighborhood)?;
        writeln!(f, "Zip Code      : {}", self.zip_code)?;
        writeln!(f, "Phone         : {}", self.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_from_raw_markup() {
        let record = ContactRecord::from_raw(
            "Padaria Central",
            "Rua das Flores, 123 -\n      Centro 13201-000",
            "ligarPara('11987654321')",
        );
        assert_eq!(
            record,
            ContactRecord {
                name: "Padaria Central".to_string(),
                address: "Rua das Flores, 123".to_string(),
                neighborhood: "Centro".to_string(),
                zip_code: "13201-000".to_string(),
                phone: "11987654321".to_string(),
            }
        );
    }
}
