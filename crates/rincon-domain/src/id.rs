//! Newtype wrappers for server-assigned numeric keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// `true` for keys the backend could have assigned (strictly positive).
            pub fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifies a catalog product.
    ProductId
);
numeric_id!(
    /// Identifies a customer profile (distinct from its login user).
    CustomerId
);
numeric_id!(
    /// Identifies one row of a customer's cart.
    CartLineId
);
numeric_id!(
    /// Identifies an order header.
    OrderId
);
numeric_id!(
    /// Identifies an order line.
    OrderLineId
);
numeric_id!(
    /// Identifies a login user.
    UserId
);
numeric_id!(RoleId);
numeric_id!(BrandId);
numeric_id!(CategoryId);
numeric_id!(GenderId);
numeric_id!(ProductTypeId);
