//! Application-state snapshot types supplied by the host UI each turn.
//!
//! The assistant never owns this data: the host constructs an `AppSnapshot`
//! from its live user/cart/compare/inventory state and passes it in per call.
//! Missing pieces (no user, no vehicle list) degrade to empty defaults.

use serde::{Deserialize, Serialize};

/// Body style of a vehicle, serialized as the catalog's display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyShape {
    #[serde(rename = "SUV")]
    Suv,
    #[serde(rename = "Sedan")]
    Sedan,
    #[serde(rename = "Truck")]
    Truck,
    #[serde(rename = "Hatchback")]
    Hatchback,
    #[serde(rename = "Coupe")]
    Coupe,
    #[serde(rename = "Convertible")]
    Convertible,
    #[serde(rename = "Minivan")]
    Minivan,
}

impl BodyShape {
    /// Display label matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            BodyShape::Suv => "SUV",
            BodyShape::Sedan => "Sedan",
            BodyShape::Truck => "Truck",
            BodyShape::Hatchback => "Hatchback",
            BodyShape::Coupe => "Coupe",
            BodyShape::Convertible => "Convertible",
            BodyShape::Minivan => "Minivan",
        }
    }

    /// Map a lowercase utterance keyword to a shape.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "suv" => Some(BodyShape::Suv),
            "sedan" => Some(BodyShape::Sedan),
            "truck" => Some(BodyShape::Truck),
            "hatchback" => Some(BodyShape::Hatchback),
            "coupe" => Some(BodyShape::Coupe),
            "convertible" => Some(BodyShape::Convertible),
            "minivan" => Some(BodyShape::Minivan),
            _ => None,
        }
    }
}

/// Fuel preference learned from conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelKind {
    #[serde(rename = "electric")]
    Electric,
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl FuelKind {
    pub fn label(&self) -> &'static str {
        match self {
            FuelKind::Electric => "Electric",
            FuelKind::Hybrid => "Hybrid",
        }
    }
}

/// Budget sentiment learned from pricing conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "affordable")]
    Affordable,
    #[serde(rename = "luxury")]
    Luxury,
}

impl BudgetBand {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::Affordable => "affordable",
            BudgetBand::Luxury => "luxury",
        }
    }
}

/// A catalog vehicle as served by the storefront inventory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub shape: BodyShape,
    /// Whole dollars.
    pub price: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "newVehicle")]
    pub new_vehicle: bool,
    #[serde(default)]
    pub accident: bool,
}

impl Vehicle {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        shape: BodyShape,
        price: u32,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            shape,
            price,
            description: String::new(),
            new_vehicle: false,
            accident: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_new_vehicle(mut self, new_vehicle: bool) -> Self {
        self.new_vehicle = new_vehicle;
        self
    }

    pub fn with_accident(mut self, accident: bool) -> Self {
        self.accident = accident;
        self
    }

    /// "Brand Model" as shown in cart and compare listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// "Brand Model ($price)" as quoted in replies.
    pub fn listing_label(&self) -> String {
        format!(
            "{} {} ({})",
            self.brand,
            self.model,
            crate::money::format_usd(u64::from(self.price))
        )
    }
}

/// One cart line in the host storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub brand: String,
    pub model: String,
    /// Whole dollars, per unit.
    pub price: u32,
    pub quantity: u32,
    pub shape: BodyShape,
}

impl CartItem {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        price: u32,
        quantity: u32,
        shape: BodyShape,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            price,
            quantity,
            shape,
        }
    }

    pub fn line_total(&self) -> u64 {
        u64::from(self.price) * u64::from(self.quantity)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// The authenticated customer, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Preferred form of address: name when known, email otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Point-in-time copy of the host application state, replaced wholesale
/// on every update. The core reads it and never writes it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSnapshot {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    /// Bounded to 4 entries by the host; the core only reads it.
    #[serde(default)]
    pub compare_items: Vec<Vehicle>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl AppSnapshot {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Total cart value in whole dollars.
    pub fn cart_total(&self) -> u64 {
        self.cart_items.iter().map(CartItem::line_total).sum()
    }

    /// Total cart quantity across lines.
    pub fn cart_quantity(&self) -> u32 {
        self.cart_items.iter().map(|item| item.quantity).sum()
    }
}
