pub mod get_all_products;
pub mod get_product;
pub mod get_products_by_category;
