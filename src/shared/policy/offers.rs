use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Promotional offer attached to a product.
///
/// Offers are descriptive only: nothing in this layer applies them to a
/// price. `bogo`/`bxgy` grant more of the same product, `bogof`/`bxgyf`
/// grant a different (free) product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "offer_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    None,
    Bogo,
    Bxgy,
    Bogof,
    Bxgyf,
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferType::None => write!(f, "none"),
            OfferType::Bogo => write!(f, "bogo"),
            OfferType::Bxgy => write!(f, "bxgy"),
            OfferType::Bogof => write!(f, "bogof"),
            OfferType::Bxgyf => write!(f, "bxgyf"),
        }
    }
}

impl OfferType {
    /// Quantity-based variants need buy_x/get_y to be meaningful
    pub fn needs_quantities(&self) -> bool {
        matches!(self, OfferType::Bxgy | OfferType::Bxgyf)
    }

    /// Cross-product variants grant a different product for free
    pub fn needs_free_product(&self) -> bool {
        matches!(self, OfferType::Bogof | OfferType::Bxgyf)
    }
}

/// Human-readable offer line for listing rows.
///
/// Missing quantities render as "X"/"Y" placeholders rather than failing;
/// the write path is where quantity presence is enforced.
pub fn resolve_offer_text(offer: OfferType, buy_x: Option<i32>, get_y: Option<i32>) -> String {
    let x = buy_x.map_or_else(|| "X".to_string(), |v| v.to_string());
    let y = get_y.map_or_else(|| "Y".to_string(), |v| v.to_string());

    match offer {
        OfferType::None => "No offer".to_string(),
        OfferType::Bogo => "Buy 1 Get 1!".to_string(),
        OfferType::Bxgy => format!("Buy {} Get {}!", x, y),
        OfferType::Bogof => "Buy 1 Get 1 Free!".to_string(),
        OfferType::Bxgyf => format!("Buy {} Get {} Free!", x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_offers_substitute_values() {
        let text = resolve_offer_text(OfferType::Bxgy, Some(2), Some(1));
        assert!(text.contains('2'));
        assert!(text.contains('1'));

        assert_eq!(
            resolve_offer_text(OfferType::Bxgyf, Some(3), Some(2)),
            "Buy 3 Get 2 Free!"
        );
    }

    #[test]
    fn missing_quantities_fall_back_to_placeholders() {
        assert_eq!(resolve_offer_text(OfferType::Bxgy, None, None), "Buy X Get Y!");
        assert_eq!(
            resolve_offer_text(OfferType::Bxgyf, Some(2), None),
            "Buy 2 Get Y Free!"
        );
    }

    #[test]
    fn none_ignores_quantities() {
        assert_eq!(resolve_offer_text(OfferType::None, Some(2), Some(1)), "No offer");
        assert_eq!(resolve_offer_text(OfferType::None, None, None), "No offer");
    }

    #[test]
    fn fixed_variants_ignore_quantities() {
        assert_eq!(resolve_offer_text(OfferType::Bogo, Some(4), Some(4)), "Buy 1 Get 1!");
        assert_eq!(
            resolve_offer_text(OfferType::Bogof, None, None),
            "Buy 1 Get 1 Free!"
        );
    }

    #[test]
    fn required_field_matrix() {
        assert!(!OfferType::None.needs_quantities());
        assert!(!OfferType::Bogo.needs_quantities());
        assert!(OfferType::Bxgy.needs_quantities());
        assert!(OfferType::Bxgyf.needs_quantities());

        assert!(OfferType::Bogof.needs_free_product());
        assert!(OfferType::Bxgyf.needs_free_product());
        assert!(!OfferType::Bxgy.needs_free_product());
    }
}
