use maud::{html, Markup, DOCTYPE};

/// Shared page shell for the handful of server-rendered pages.
pub fn site_layout(site_name: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - " (site_name) }
                link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet";
            }
            body class="bg-white" {
                header class="container py-3 d-flex justify-content-between" {
                    a href="/" class="fs-4 text-decoration-none" { (site_name) }
                    nav {
                        a href="/" class="me-3" { "Home" }
                        a href="/admin" { "Admin" }
                    }
                }
                div class="container py-4" {
                    (content)
                }
                footer class="container py-4 text-muted" {
                    a href="/privacy" class="me-3" { "Privacy" }
                    a href="/terms" { "Terms" }
                }
            }
        }
    }
}
