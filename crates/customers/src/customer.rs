use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, DomainError, DomainResult, Entity};

/// A registered customer.
///
/// The order workflow only checks that a customer exists; name and email are
/// carried for the registration surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Registration input for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check registration input before it reaches a repository.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation("customer email must contain '@'"));
        }
        Ok(())
    }

    /// Materialize the customer under a freshly assigned id.
    pub fn into_customer(self, id: CustomerId, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let err = NewCustomer::new("   ", "a@b.test").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("customer name cannot be empty"));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let err = NewCustomer::new("Ada", "ada.example").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn into_customer_normalizes_fields() {
        let id = CustomerId::new();
        let now = Utc::now();
        let customer = NewCustomer::new("  Ada Lovelace ", " Ada@Example.Test ").into_customer(id, now);

        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email, "ada@example.test");
        assert_eq!(customer.created_at, now);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any non-blank name with an '@' email validates.
            #[test]
            fn well_formed_input_validates(
                name in "[A-Za-z][A-Za-z ]{0,40}",
                local in "[a-z0-9]{1,12}",
                domain in "[a-z]{1,12}\\.[a-z]{2,4}"
            ) {
                let input = NewCustomer::new(name, format!("{local}@{domain}"));
                prop_assert!(input.validate().is_ok());
            }
        }
    }
}
