//! Header contract for Squarespace-style catalog exports.
//!
//! Source header text is an external contract and is matched case- and
//! whitespace-exactly. Columns outside the contract pass through the
//! pipeline unchanged.

pub const PRODUCT_ID: &str = "Product ID [Non Editable]";
pub const VARIANT_ID: &str = "Variant ID [Non Editable]";
pub const PRODUCT_TYPE: &str = "Product Type [Non Editable]";
pub const PRODUCT_PAGE: &str = "Product Page";
pub const PRODUCT_URL: &str = "Product URL";
pub const TITLE: &str = "Title";
pub const DESCRIPTION: &str = "Description";
pub const SKU: &str = "SKU";
pub const PRICE: &str = "Price";
pub const STOCK: &str = "Stock";
pub const HOSTED_IMAGE_URLS: &str = "Hosted Image URLs";

pub const ITEM_GROUP_ID: &str = "item_group_id";
pub const ID: &str = "id";
pub const LINK: &str = "link";
pub const TITLE_FIELD: &str = "title";
pub const DESCRIPTION_FIELD: &str = "description";
pub const IMAGE_LINK: &str = "image_link";
pub const PRICE_FIELD: &str = "price";
pub const AVAILABILITY: &str = "availability";
pub const GOOGLE_PRODUCT_CATEGORY: &str = "google_product_category";
pub const CONDITION: &str = "condition";

pub const AVAILABILITY_IN_STOCK: &str = "in stock";
pub const AVAILABILITY_OUT_OF_STOCK: &str = "out of stock";
pub const CONDITION_NEW: &str = "new";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    PRODUCT_ID,
    VARIANT_ID,
    PRODUCT_PAGE,
    PRODUCT_URL,
    TITLE,
    DESCRIPTION,
    HOSTED_IMAGE_URLS,
    PRICE,
    STOCK,
];

/// Source-to-canonical renames applied by the column-mapping stage.
/// `Product Page` is not renamed: link derivation consumes it and the
/// column is removed from the table afterwards.
pub fn canonical_renames() -> &'static [(&'static str, &'static str)] {
    &[
        (PRODUCT_ID, ITEM_GROUP_ID),
        (VARIANT_ID, ID),
        (PRODUCT_URL, LINK),
        (TITLE, TITLE_FIELD),
        (DESCRIPTION, DESCRIPTION_FIELD),
        (HOSTED_IMAGE_URLS, IMAGE_LINK),
        (PRICE, PRICE_FIELD),
        (STOCK, AVAILABILITY),
    ]
}
