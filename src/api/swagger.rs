use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Service API",
        version = "1.0.0",
        description = "Backend for the shirt storefront.\n\n**Features:**\n- Orders mirrored into each user's record\n- User directory and saved addresses\n- Product catalog and reviews\n- Policy pages, carousel and discount codes\n- Contact form relayed by email\n\nNo authentication.",
        contact(
            name = "Storefront Team"
        )
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Orders
        crate::api::orders::confirm_order,
        crate::api::orders::list_orders,
        crate::api::orders::list_user_orders,
        crate::api::orders::update_order_status,

        // Users
        crate::api::users::register_user,
        crate::api::users::update_address,
        crate::api::users::get_addresses,

        // Catalog
        crate::api::shirts::list_shirts,
        crate::api::shirts::get_shirt,
        crate::api::shirts::create_shirt,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::create_review,

        // Content
        crate::api::content::get_carousel,
        crate::api::content::get_privacy_policy,
        crate::api::content::get_terms,
        crate::api::content::get_return_policy,
        crate::api::content::get_shipping_info,
        crate::api::content::get_discounts,

        // Contact
        crate::api::contact::contact_us,
    ),
    components(
        schemas(
            crate::api::ErrorResponse,
            crate::api::health::HealthResponse,

            // Orders
            crate::models::CreateOrderRequest,
            crate::models::UpdateOrderStatusRequest,
            crate::models::OrderResponse,
            crate::models::CartItem,
            crate::api::orders::OrderEnvelope,
            crate::api::orders::OrderListResponse,
            crate::api::orders::UnsyncedOrderResponse,

            // Users
            crate::models::Address,
            crate::models::RegisterUserRequest,
            crate::models::UpdateAddressRequest,
            crate::models::GetAddressRequest,
            crate::models::UserResponse,
            crate::api::users::UserEnvelope,
            crate::api::users::AddressListResponse,

            // Catalog
            crate::models::Category,
            crate::models::SubCategory,
            crate::models::CreateShirtRequest,
            crate::models::ShirtResponse,
            crate::api::shirts::ShirtEnvelope,
            crate::api::shirts::ShirtListResponse,
            crate::models::CreateReviewRequest,
            crate::models::ReviewResponse,
            crate::api::reviews::ReviewEnvelope,
            crate::api::reviews::ReviewListResponse,

            // Content
            crate::models::ContentKind,
            crate::models::ContentDocument,
            crate::models::Discount,
            crate::api::content::CarouselResponse,
            crate::api::content::PolicyResponse,
            crate::api::content::DiscountListResponse,

            // Contact
            crate::models::ContactRequest,
            crate::api::contact::ContactResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check."),
        (name = "Orders", description = "Checkout and order tracking. Each order is stored on its own and copied into the owner's user record."),
        (name = "Users", description = "Users keyed by 10-digit phone number, with saved delivery addresses."),
        (name = "Catalog", description = "Shirts, filterable by sub-category."),
        (name = "Reviews", description = "Customer reviews (rating 1-5)."),
        (name = "Content", description = "Carousel, policy pages and active discount codes. Read only."),
        (name = "Contact", description = "Contact form relayed to the support inbox."),
    )
)]
pub struct ApiDoc;
