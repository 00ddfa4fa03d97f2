pub mod about_us;
pub mod assets;
pub mod blog;
pub mod brand;
pub mod contact_info;
pub mod division;
pub mod gallery;
pub mod home_content;
pub mod news;
pub mod product;
pub mod product_category;
