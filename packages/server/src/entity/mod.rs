pub mod about_us;
pub mod blog;
pub mod brand;
pub mod contact_info;
pub mod division;
pub mod gallery_item;
pub mod home_content;
pub mod news_item;
pub mod product;
pub mod product_category;
