use super::{PageMeta, SiteContext, layout, markdown};
use crate::text;
use crate::types::Book;
use maud::{Markup, html};
use serde_json::json;

pub fn book_path(book: &Book) -> String {
    format!("/literature/{}/", book.slug)
}

fn cover(ctx: &SiteContext, book: &Book) -> Markup {
    html! {
        @if !book.cover_image.trim().is_empty() {
            img.book-cover src=(ctx.link(&book.cover_image)) alt={ (book.title) " cover" } loading="lazy";
        }
    }
}

pub fn literature_index(ctx: &SiteContext, books: &[Book]) -> Markup {
    let meta = PageMeta::new(
        "Literature",
        "Books from Daybook: the collected daily readings, a Twelve Steps workbook and a guided journal.",
        "/literature/",
    )
    .class("literature-index");

    let body = html! {
        h1 { "Literature" }
        ul.book-list {
            @for book in books {
                li.book-card {
                    a href=(ctx.link(&book_path(book))) {
                        (cover(ctx, book))
                        h2 { (book.title) }
                    }
                    @if !book.subtitle.trim().is_empty() {
                        p.subtitle { (book.subtitle) }
                    }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}

pub fn book(ctx: &SiteContext, book: &Book) -> Markup {
    let path = book_path(book);
    let mut json_ld = json!({
        "@context": "https://schema.org",
        "@type": "Book",
        "name": book.title,
        "url": ctx.absolute(&path),
        "publisher": {"@type": "Organization", "name": ctx.site_name()},
    });
    if !book.cover_image.trim().is_empty() {
        json_ld["image"] = json!(ctx.absolute(&book.cover_image));
    }
    let meta = PageMeta::new(&book.title, &text::strip_markup(&book.description), &path)
        .with_json_ld(json_ld)
        .class("book-page");

    let body = html! {
        article.book {
            p.breadcrumb { a href=(ctx.link("/literature/")) { "Literature" } }
            (cover(ctx, book))
            h1 { (book.title) }
            @if !book.subtitle.trim().is_empty() {
                p.subtitle { (book.subtitle) }
            }
            div.book-description { (markdown(&book.description)) }
            @if !book.purchase_url.trim().is_empty() {
                p.purchase {
                    a.button href=(book.purchase_url) rel="noopener" target="_blank" { "Get the book" }
                }
            }
        }
    };
    layout(ctx, &meta, body)
}
