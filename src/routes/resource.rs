//! Resource routes: products, enquiries, applications, offers.

use crate::handlers::{application, enquiry, product, resource};
use crate::model::{Application, Enquiry, Offer, Product};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(resource::list::<Product>).post(resource::create::<Product>),
        )
        .route(
            "/products/:id",
            get(resource::read::<Product>)
                .patch(resource::update::<Product>)
                .delete(resource::delete::<Product>),
        )
        .route("/products/details-by-slug/:slug", get(product::read_by_slug))
        .route(
            "/enquiries",
            get(resource::list::<Enquiry>).post(enquiry::create),
        )
        .route(
            "/enquiries/:id",
            get(enquiry::read)
                .patch(enquiry::update)
                .delete(resource::delete::<Enquiry>),
        )
        .route(
            "/applications",
            get(resource::list::<Application>).post(application::create),
        )
        .route(
            "/applications/:id",
            get(resource::read::<Application>)
                .patch(resource::update::<Application>)
                .delete(resource::delete::<Application>),
        )
        .route(
            "/offers",
            get(resource::list::<Offer>).post(resource::create::<Offer>),
        )
        .route(
            "/offers/:id",
            get(resource::read::<Offer>)
                .patch(resource::update::<Offer>)
                .delete(resource::delete::<Offer>),
        )
}
