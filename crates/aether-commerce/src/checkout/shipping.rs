//! Shipping form fields.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CommerceError;

/// Contact and address fields from the shipping step.
///
/// Everything is free text; only email and name are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ShippingDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// Apartment, suite, etc.
    pub apartment: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

/// A single input on the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    Email,
    FirstName,
    LastName,
    Address,
    Apartment,
    City,
    State,
    ZipCode,
    Phone,
}

impl ShippingField {
    pub fn label(&self) -> &'static str {
        match self {
            ShippingField::Email => "email",
            ShippingField::FirstName => "first name",
            ShippingField::LastName => "last name",
            ShippingField::Address => "address",
            ShippingField::Apartment => "apartment",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::ZipCode => "zip code",
            ShippingField::Phone => "phone",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ShippingField::Email | ShippingField::FirstName | ShippingField::LastName
        )
    }
}

impl FromStr for ShippingField {
    type Err = CommerceError;

    /// Parses the form input names (`email`, `firstName`, `zipCode`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ShippingField::Email),
            "firstName" | "first_name" => Ok(ShippingField::FirstName),
            "lastName" | "last_name" => Ok(ShippingField::LastName),
            "address" => Ok(ShippingField::Address),
            "apartment" => Ok(ShippingField::Apartment),
            "city" => Ok(ShippingField::City),
            "state" => Ok(ShippingField::State),
            "zipCode" | "zip_code" => Ok(ShippingField::ZipCode),
            "phone" => Ok(ShippingField::Phone),
            other => Err(CommerceError::UnknownField(other.to_string())),
        }
    }
}

impl ShippingDetails {
    /// Set one field.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Read one field.
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Email => &self.email,
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Address => &self.address,
            ShippingField::Apartment => &self.apartment,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
            ShippingField::Phone => &self.phone,
        }
    }

    fn field_mut(&mut self, field: ShippingField) -> &mut String {
        match field {
            ShippingField::Email => &mut self.email,
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::Address => &mut self.address,
            ShippingField::Apartment => &mut self.apartment,
            ShippingField::City => &mut self.city,
            ShippingField::State => &mut self.state,
            ShippingField::ZipCode => &mut self.zip_code,
            ShippingField::Phone => &mut self.phone,
        }
    }

    /// Labels of required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [ShippingField::Email, ShippingField::FirstName, ShippingField::LastName]
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .map(|f| f.label())
            .collect()
    }

    /// Check if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        join_nonempty(&[self.first_name.as_str(), self.last_name.as_str()], " ")
    }

    /// Address block for the review step; blank lines are dropped.
    pub fn summary_lines(&self) -> Vec<String> {
        let street = join_nonempty(&[self.address.as_str(), self.apartment.as_str()], " ");
        let region = join_nonempty(&[self.state.as_str(), self.zip_code.as_str()], " ");
        let locality = join_nonempty(&[self.city.as_str(), region.as_str()], ", ");

        [self.full_name(), street, locality, self.phone.trim().to_string()]
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect()
    }
}

fn join_nonempty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
