use super::{PageMeta, RenderError, SiteContext, layout, markdown};
use crate::admin::AdminBootstrap;
use crate::types::StaticPage;
use maud::{Markup, PreEscaped, html};

pub fn static_page(ctx: &SiteContext, page: &StaticPage) -> Markup {
    let meta = PageMeta::new(&page.title, &page.description, &format!("/{}/", page.slug))
        .class("static-page");
    let body = html! {
        article.static-content { (markdown(&page.body)) }
    };
    layout(ctx, &meta, body)
}

/// Shell for the browser-side admin app. The page carries the endpoint and
/// action set as JSON; all behaviour lives in `js/admin.js`.
pub fn admin_shell(ctx: &SiteContext) -> Result<Markup, RenderError> {
    let bootstrap = AdminBootstrap::new(&ctx.config.site.admin_endpoint).to_json()?;
    let meta = PageMeta::new("Admin", "Content administration.", "/admin/")
        .noindex()
        .class("admin-page");
    let body = html! {
        h1 { "Admin" }
        noscript { p { "The admin panel needs JavaScript." } }
        div #admin-app {}
        script #admin-config type="application/json" {
            (PreEscaped(bootstrap.replace("</", "<\\/")))
        }
        script src=(ctx.link("/js/admin.js")) defer {}
    };
    Ok(layout(ctx, &meta, body))
}

pub fn not_found(ctx: &SiteContext) -> Markup {
    let meta = PageMeta::new("Page not found", "This page does not exist.", "/404.html")
        .noindex()
        .class("not-found");
    let body = html! {
        h1 { "Page not found" }
        p { "The page you were looking for is not here." }
        ul {
            li { a href=(ctx.link("/")) { "Today's reading" } }
            li { a href=(ctx.link("/themes/")) { "Browse themes" } }
            li { a href=(ctx.link("/steps/")) { "The Twelve Steps" } }
        }
    };
    layout(ctx, &meta, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::render::tests::config_with_base;

    #[test]
    fn static_page_renders_markdown() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let pages = defaults::static_pages();
        let html = static_page(&ctx, &pages[0]).into_string();
        assert!(html.contains("<h1>About Daybook</h1>"));
        assert!(html.contains("<strong>Twelve Steps</strong>"));
        assert!(html.contains(r#"href="https://daybook.example.org/about/""#));
    }

    #[test]
    fn admin_shell_is_noindex_and_bootstrapped() {
        let config = config_with_base("/p");
        let ctx = SiteContext::new(&config, "x");
        let html = admin_shell(&ctx).unwrap().into_string();
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(html.contains(r#"id="admin-config""#));
        assert!(html.contains(r#""endpoint":"/api/admin""#));
        assert!(html.contains(r#"src="/p/js/admin.js""#));
    }

    #[test]
    fn not_found_links_home() {
        let config = config_with_base("");
        let ctx = SiteContext::new(&config, "x");
        let html = not_found(&ctx).into_string();
        assert!(html.contains("noindex"));
        assert!(html.contains("Page not found"));
    }
}
