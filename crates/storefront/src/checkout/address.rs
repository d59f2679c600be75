//! Shipping address form and validation.

use serde::{Deserialize, Serialize};

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name, camelCase as rendered.
    pub field: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

/// Raw address form input, retained across checkout steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl AddressForm {
    /// Validate the form into a [`ShippingAddress`].
    ///
    /// All fields are required, each with a minimum trimmed length.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message; the form itself is
    /// untouched so the user can correct and resubmit.
    pub fn validate(&self) -> Result<ShippingAddress, Vec<FieldError>> {
        let mut errors = Vec::new();
        let checks: [(&'static str, &str, usize, &'static str); 6] = [
            ("fullName", &self.full_name, 3, "Full name is required"),
            (
                "phoneNumber",
                &self.phone_number,
                10,
                "Valid phone number is required",
            ),
            ("address", &self.address, 10, "Complete address is required"),
            ("city", &self.city, 2, "City is required"),
            ("state", &self.state, 2, "State is required"),
            ("pincode", &self.pincode, 6, "Valid pincode is required"),
        ];
        for (field, value, min, message) in checks {
            if value.trim().chars().count() < min {
                errors.push(FieldError { field, message });
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ShippingAddress {
            full_name: self.full_name.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            pincode: self.pincode.trim().to_owned(),
        })
    }
}

/// A validated shipping address, as persisted inside orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}
