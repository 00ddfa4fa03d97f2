use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/admin", admin_routes(config))
        .nest("/public", public_routes())
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(asset_routes(config))
        .nest("/gallery", gallery_routes())
        .nest("/products", product_routes())
        .nest("/about-us", about_us_routes())
        .nest("/brands", brand_routes())
        .nest("/news", news_routes())
        .nest("/blogs", blog_routes())
        .nest("/categories", category_routes())
        .nest("/contact", contact_routes())
        .nest("/divisions", division_routes())
        .nest("/home-content", home_content_routes())
}

fn asset_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::assets::upload_asset))
        .layer(handlers::assets::upload_body_limit(
            config.storage.max_upload_size,
        ));

    OpenApiRouter::new()
        .routes(routes!(
            handlers::assets::find_unused_assets,
            handlers::assets::delete_unused_assets
        ))
        .merge(upload)
}

fn gallery_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::gallery::list_gallery_items,
            handlers::gallery::create_gallery_item
        ))
        .routes(routes!(handlers::gallery::reorder_gallery_items))
        .routes(routes!(
            handlers::gallery::get_gallery_item,
            handlers::gallery::update_gallery_item,
            handlers::gallery::delete_gallery_item
        ))
}

fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::product::list_products,
            handlers::product::create_product
        ))
        .routes(routes!(
            handlers::product::get_product,
            handlers::product::update_product,
            handlers::product::delete_product
        ))
}

fn about_us_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::about_us::get_about_us,
        handlers::about_us::upsert_about_us
    ))
}

fn brand_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::brand::list_brands,
            handlers::brand::create_brand
        ))
        .routes(routes!(
            handlers::brand::get_brand,
            handlers::brand::update_brand,
            handlers::brand::delete_brand
        ))
}

fn news_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::news::list_news, handlers::news::create_news))
        .routes(routes!(
            handlers::news::get_news,
            handlers::news::update_news,
            handlers::news::delete_news
        ))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::blog::list_blogs, handlers::blog::create_blog))
        .routes(routes!(handlers::blog::list_blog_divisions))
        .routes(routes!(
            handlers::blog::get_blog,
            handlers::blog::update_blog,
            handlers::blog::delete_blog
        ))
        .routes(routes!(handlers::blog::toggle_blog_published))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::product_category::list_categories,
            handlers::product_category::create_category
        ))
        .routes(routes!(
            handlers::product_category::get_category,
            handlers::product_category::update_category,
            handlers::product_category::delete_category
        ))
}

fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::contact_info::get_contact_info,
        handlers::contact_info::upsert_contact_info
    ))
}

fn division_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::division::list_divisions,
            handlers::division::create_division
        ))
        .routes(routes!(handlers::division::list_all_divisions))
        .routes(routes!(handlers::division::reorder_divisions))
        .routes(routes!(
            handlers::division::get_division,
            handlers::division::update_division,
            handlers::division::delete_division
        ))
        .routes(routes!(handlers::division::toggle_division_status))
}

fn home_content_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::home_content::get_home_content,
        handlers::home_content::upsert_home_content
    ))
}

fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest(
            "/gallery",
            OpenApiRouter::new()
                .routes(routes!(handlers::gallery::list_public_gallery))
                .routes(routes!(handlers::gallery::get_public_gallery_item)),
        )
        .nest(
            "/products",
            OpenApiRouter::new()
                .routes(routes!(handlers::product::list_public_products))
                .routes(routes!(handlers::product::get_public_product)),
        )
        .nest(
            "/about-us",
            OpenApiRouter::new().routes(routes!(handlers::about_us::get_public_about_us)),
        )
        .nest(
            "/brands",
            OpenApiRouter::new().routes(routes!(handlers::brand::list_public_brands)),
        )
        .nest(
            "/news",
            OpenApiRouter::new()
                .routes(routes!(handlers::news::list_public_news))
                .routes(routes!(handlers::news::get_public_news)),
        )
        .nest(
            "/blogs",
            OpenApiRouter::new()
                .routes(routes!(handlers::blog::list_public_blogs))
                .routes(routes!(handlers::blog::list_recent_blogs))
                .routes(routes!(handlers::blog::list_public_blog_divisions))
                .routes(routes!(handlers::blog::get_public_blog_by_slug))
                .routes(routes!(handlers::blog::get_public_blog)),
        )
        .nest(
            "/categories",
            OpenApiRouter::new()
                .routes(routes!(handlers::product_category::list_public_categories)),
        )
        .nest(
            "/contact",
            OpenApiRouter::new().routes(routes!(handlers::contact_info::get_public_contact_info)),
        )
        .nest(
            "/divisions",
            OpenApiRouter::new()
                .routes(routes!(handlers::division::list_public_divisions))
                .routes(routes!(handlers::division::get_public_division_by_slug))
                .routes(routes!(handlers::division::get_public_division)),
        )
        .nest(
            "/home-content",
            OpenApiRouter::new()
                .routes(routes!(handlers::home_content::get_public_home_content)),
        )
}
