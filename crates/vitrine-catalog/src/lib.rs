#![deny(missing_docs)]
#![doc = "Typed catalog mapping for the vitrine merchandising engine: wire DTOs, \
the versioned product model, and category, brand, price and promo normalization."]

pub mod brand;
pub mod category;
pub mod dto;
pub mod price;
pub mod product;
pub mod promo;

pub use brand::resolve_brand;
pub use category::{normalize_subcategory, Category};
pub use price::{
    compute_badges, discount_percent, format_price, format_price_rub, is_discounted, min_price,
};
pub use product::{MappedCatalog, Product, ProductMapper, PLACEHOLDER_IMAGE};
pub use promo::{is_cloudinary_url, Campaign, CampaignTone, CmsPromo, PromoSpace};
