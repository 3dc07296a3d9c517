use maud::{html, Markup};

use crate::templates::layout::site_layout;

pub fn home_page(site_name: &str) -> Markup {
    site_layout(
        site_name,
        "Home",
        html! {
            h1 { "Find a home in Ndola" }
            p class="text-muted" {
                "Browse properties for sale and rent through the listings API at "
                code { "/api/listings" }
                "."
            }
        },
    )
}

pub fn admin_page(site_name: &str) -> Markup {
    site_layout(
        site_name,
        "Admin",
        html! {
            h1 { "Admin" }
            p class="text-muted" {
                "Sign in with an agent or admin account, then publish listings via "
                code { "POST /api/listings" }
                "."
            }
        },
    )
}

pub fn privacy_page(site_name: &str) -> Markup {
    site_layout(
        site_name,
        "Privacy Policy",
        html! {
            h1 { "Privacy Policy" }
            p class="text-muted" { "We respect your privacy. This demo page can be customized." }
            a class="btn btn-primary" href="/" { "Back to Home" }
        },
    )
}

pub fn terms_page(site_name: &str) -> Markup {
    site_layout(
        site_name,
        "Terms of Service",
        html! {
            h1 { "Terms of Service" }
            p class="text-muted" { "These are placeholder terms. Customize as needed." }
            a class="btn btn-primary" href="/" { "Back to Home" }
        },
    )
}
