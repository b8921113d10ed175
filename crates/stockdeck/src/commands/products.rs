//! Product command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use stockdeck_core::{NewProduct, Product, ProductChanges, ProductId, ProductStore};

use crate::cli::{AddArgs, DeleteArgs, GlobalOpts, ListArgs, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            price: format!("{:.2}", p.price),
            stock: p.stock,
            category: p.category.clone(),
        }
    }
}

fn detail(p: &Product) -> String {
    let mut lines = vec![
        format!("ID:        {}", p.id),
        format!("Title:     {}", p.title),
        format!("Price:     {:.2}", p.price),
        format!("Stock:     {}", p.stock),
        format!("Category:  {}", p.category),
    ];
    if !p.thumbnail.is_empty() {
        lines.push(format!("Thumbnail: {}", p.thumbnail));
    }
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn fetch(store: &ProductStore, global: &GlobalOpts) -> Result<(), CliError> {
    store.fetch_all().await?;

    if !global.quiet {
        let summary = format!(
            "Fetched {} products across {} categories",
            store.product_count(),
            store.categories().len()
        );
        if output::should_color() {
            eprintln!("{}", summary.green());
        } else {
            eprintln!("{summary}");
        }
    }
    Ok(())
}

pub async fn list(
    store: &ProductStore,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.refresh {
        store.fetch_all().await?;
    } else if store.is_empty() && !global.quiet {
        eprintln!("Local catalog is empty -- run `stockdeck fetch` or pass --refresh.");
    }

    if let Some(query) = args.query {
        store.set_query(query);
    }
    if let Some(category) = args.category {
        store.set_category(category.into());
    }
    if let Some(key) = args.sort_by {
        store.set_sort_by(key.into());
    }
    if let Some(dir) = args.sort_dir {
        store.set_sort_dir(dir.into());
    }

    let visible = store.visible_products();
    let rendered = output::render_list(
        global.output,
        visible.as_slice(),
        |p| ProductRow::from(p),
        |p| p.id.to_string(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn add(store: &ProductStore, args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.title.trim().is_empty() {
        return Err(CliError::Validation {
            field: "title".into(),
            reason: "must not be empty".into(),
        });
    }

    let created = store
        .create(NewProduct {
            title: args.title,
            price: args.price,
            stock: args.stock,
            category: args.category,
            thumbnail: args.thumbnail,
        })
        .await?;

    let rendered = output::render_single(global.output, &created, detail, |p| p.id.to_string());
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn update(
    store: &ProductStore,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let changes = ProductChanges {
        title: args.title,
        price: args.price,
        stock: args.stock,
        category: args.category,
        thumbnail: args.thumbnail,
    };
    if changes.title.is_none()
        && changes.price.is_none()
        && changes.stock.is_none()
        && changes.category.is_none()
        && changes.thumbnail.is_none()
    {
        return Err(CliError::Validation {
            field: "changes".into(),
            reason: "provide at least one of --title, --price, --stock, --category, --thumbnail"
                .into(),
        });
    }

    let id = ProductId::from(args.id.as_str());
    let outcome = store.update(&id, changes).await.map_err(|e| {
        if e.is_not_found() {
            CliError::NotFound { id: id.to_string() }
        } else {
            e.into()
        }
    })?;
    match outcome {
        Some(updated) => {
            let rendered =
                output::render_single(global.output, &updated, detail, |p| p.id.to_string());
            output::print_output(&rendered, global.quiet);
        }
        None => {
            if !global.quiet {
                eprintln!("Remote updated, but '{id}' has no local record; nothing merged.");
            }
        }
    }
    Ok(())
}

pub async fn delete(
    store: &ProductStore,
    args: DeleteArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !util::confirm(&format!("Delete product '{}'?", args.id), global.yes)? {
        return Ok(());
    }

    let id = ProductId::from(args.id.as_str());
    store.delete(&id).await.map_err(|e| {
        if e.is_not_found() {
            CliError::NotFound { id: id.to_string() }
        } else {
            e.into()
        }
    })?;

    if !global.quiet {
        eprintln!("Product '{id}' deleted");
    }
    Ok(())
}

pub fn categories(store: &ProductStore, global: &GlobalOpts) {
    let categories = store.categories();
    let rendered = match global.output {
        crate::cli::OutputFormat::Table | crate::cli::OutputFormat::Plain => categories.join("\n"),
        crate::cli::OutputFormat::Json => {
            serde_json::to_string_pretty(&categories).expect("serialization should not fail")
        }
        crate::cli::OutputFormat::Yaml => {
            serde_yaml::to_string(&categories).expect("serialization should not fail")
        }
    };
    output::print_output(&rendered, global.quiet);
}
