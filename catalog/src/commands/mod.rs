pub mod add_product;
pub mod delete_product;
pub mod update_product;
