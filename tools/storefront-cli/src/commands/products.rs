//! Product listing command.

use anyhow::Result;
use serde::Serialize;
use storefront_core::catalog::FetchStatus;
use storefront_core::search::{
    Facets, Filters, ListingQuery, ListingView, Pagination, SortOption, PAGE_SIZE,
};

use super::{print_cart_totals, CartSummary, ProductsArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Page numbers shown in the page strip.
const PAGE_STRIP_LEN: usize = 5;

#[derive(Serialize)]
struct ListingOutput<'a> {
    status: FetchStatus,
    search: &'a str,
    sort: SortOption,
    #[serde(flatten)]
    listing: &'a ListingView<'a>,
    cart: CartSummary<'a>,
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args);
    let cart = ctx.open_cart()?;
    let catalog = ctx.fetch_catalog(args.search.as_deref()).await?;

    let facets = Facets::from_products(catalog.items());
    let view = ListingView::from_catalog(&catalog, &facets, &query);
    let currency = ctx.config.display.currency;

    if ctx.output.is_json() {
        ctx.output.json(&ListingOutput {
            status: catalog.status(),
            search: catalog.search_term(),
            sort: query.sort,
            listing: &view,
            cart: CartSummary::of(&cart),
        });
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", view.visible_count));
    ctx.output.kv("Catalog", &status_badge(catalog.status().as_str()));
    if !catalog.search_term().is_empty() {
        ctx.output.kv("Search", catalog.search_term());
    }
    if query.sort != SortOption::None {
        ctx.output.kv("Sort", query.sort.display_name());
    }

    if view.is_empty() {
        ctx.output.info("No product found");
    } else {
        let widths = [6, 32, 12, 10];
        ctx.output
            .table_row(&["ID", "NAME", "PRICE", "CREATED"], &widths);
        for product in &view.items {
            let price = product.price.display(currency);
            let created = product.created_at.format("%Y-%m-%d").to_string();
            ctx.output.table_row(
                &[product.id.as_str(), &product.name, &price, &created],
                &widths,
            );
        }

        let pagination = &view.pagination;
        let strip: Vec<String> = pagination
            .page_numbers(PAGE_STRIP_LEN)
            .into_iter()
            .map(|n| {
                if n == pagination.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.kv(
            "Page",
            &format!(
                "{} of {} (items {}-{}): {}",
                pagination.page,
                pagination.total_pages,
                pagination.start_item(),
                pagination.end_item(),
                strip.join(" ")
            ),
        );
        if let Some(hint) = next_page_hint(pagination) {
            ctx.output.info(&hint);
        }
    }

    ctx.output.header("Filters");
    ctx.output.kv("Brands", &facet_line(&view.brands, &query.filters.brands));
    ctx.output.kv("Models", &facet_line(&view.models, &query.filters.models));

    println!();
    print_cart_totals(&cart.totals(), currency, ctx);

    Ok(())
}

fn build_query(args: &ProductsArgs) -> ListingQuery {
    let mut filters = Filters::new();
    for brand in &args.brands {
        filters.toggle_brand(brand);
    }
    for model in &args.models {
        filters.toggle_model(model);
    }

    ListingQuery::new()
        .with_filters(filters)
        .with_sort(SortOption::parse(&args.sort))
        .with_page(args.page)
        .with_brand_search(args.brand_search.clone().unwrap_or_default())
        .with_model_search(args.model_search.clone().unwrap_or_default())
}

fn next_page_hint(pagination: &Pagination) -> Option<String> {
    if pagination.is_last() {
        None
    } else {
        Some(format!("Next page: --page {}", pagination.page + 1))
    }
}

/// Facet names, selected ones marked with `*`.
fn facet_line(facets: &[&str], selected: &[String]) -> String {
    if facets.is_empty() {
        return "-".to_string();
    }
    facets
        .iter()
        .map(|f| {
            if selected.iter().any(|s| s.as_str() == *f) {
                format!("*{}", f)
            } else {
                f.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProductsArgs {
        ProductsArgs {
            search: None,
            brands: Vec::new(),
            models: Vec::new(),
            brand_search: None,
            model_search: None,
            sort: String::new(),
            page: 1,
        }
    }

    #[test]
    fn test_build_query() {
        let mut a = args();
        a.brands = vec!["Apple".to_string(), "Samsung".to_string()];
        a.models = vec!["Galaxy".to_string()];
        a.sort = "New to old".to_string();
        a.page = 0;
        a.brand_search = Some("app".to_string());

        let query = build_query(&a);
        assert_eq!(query.filters.brands, vec!["Apple", "Samsung"]);
        assert_eq!(query.filters.models, vec!["Galaxy"]);
        assert_eq!(query.sort, SortOption::CreatedDesc);
        assert_eq!(query.page, 1);
        assert_eq!(query.brand_search, "app");
        assert_eq!(query.model_search, "");
    }

    #[test]
    fn test_repeated_brand_toggles_off() {
        let mut a = args();
        a.brands = vec!["Apple".to_string(), "Apple".to_string()];
        assert!(build_query(&a).filters.brands.is_empty());
    }

    #[test]
    fn test_next_page_hint_stops_at_last_page() {
        let first = Pagination::new(1, PAGE_SIZE, 25);
        assert_eq!(next_page_hint(&first).as_deref(), Some("Next page: --page 2"));

        let last = Pagination::new(3, PAGE_SIZE, 25);
        assert!(next_page_hint(&last).is_none());
    }

    #[test]
    fn test_facet_line_marks_selection() {
        let selected = vec!["Samsung".to_string()];
        assert_eq!(facet_line(&["Apple", "Samsung"], &selected), "Apple, *Samsung");
        assert_eq!(facet_line(&[], &selected), "-");
    }
}
