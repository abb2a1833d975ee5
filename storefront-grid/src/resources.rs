//! Ready-made grids for the storefront administration resources.
//!
//! Each [`Resource`] knows its endpoint, its container id and how its columns
//! are formatted. [`Resource::config`] returns a [`GridConfig`] with the
//! edit/delete actions declared but unbound; the caller binds callbacks with
//! [`GridConfig::on_action`] and [`GridConfig::on_add_click`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::GridConfig;
use crate::column::Column;
use crate::column::RowAction;
use crate::column::raw_text;
use crate::model::Cell;
use crate::query::Direction;

/// Total stock at or below this is flagged as low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// An administration resource with a preset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Brands,
    Categories,
    SizeTypes,
    Users,
}

impl Resource {
    /// Every resource, in menu order.
    pub const ALL: [Resource; 5] = [
        Resource::Products,
        Resource::Brands,
        Resource::Categories,
        Resource::SizeTypes,
        Resource::Users,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Products => "products",
            Resource::Brands => "brands",
            Resource::Categories => "categories",
            Resource::SizeTypes => "size-types",
            Resource::Users => "users",
        }
    }

    /// Id of the container the grid mounts in.
    pub fn container_id(self) -> &'static str {
        match self {
            Resource::Products => "products-datagrid",
            Resource::Brands => "brands-datagrid",
            Resource::Categories => "product-categories-datagrid",
            Resource::SizeTypes => "sizetypes-datagrid",
            Resource::Users => "users-datagrid",
        }
    }

    /// Endpoint path, relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Products => "/product/products/all",
            Resource::Brands => "/product/brands",
            Resource::Categories => "/product/product-categories",
            Resource::SizeTypes => "/product/size-types",
            Resource::Users => "/users",
        }
    }

    /// Whether the endpoint needs the session cookie.
    pub fn use_cookies(self) -> bool {
        matches!(self, Resource::Products | Resource::Users)
    }

    /// Field the grid is initially sorted by, ascending.
    pub fn default_sort(self) -> &'static str {
        match self {
            Resource::Users => "lastname",
            _ => "name",
        }
    }

    /// Column definitions. Image cells link to `server_base_url`.
    ///
    /// Titles and formatter wording are English whatever the grid's
    /// [`Labels`](crate::Labels); booleans and prices still follow them.
    pub fn columns(self, server_base_url: &str) -> Vec<Column> {
        let base = server_base_url.trim_end_matches('/').to_string();
        match self {
            Resource::Products => vec![
                Column::new("name", "Name"),
                Column::new("price", "Price"),
                Column::new("brand.name", "Brand"),
                Column::new("size_type.name", "Size type"),
                Column::new("categories", "Categories")
                    .formatter(|value, _| name_list(value, "None")),
                Column::new("is_active", "Status").formatter(|value, _| status(value)),
                Column::new("variants", "Total stock").formatter(|value, _| stock(value)),
                Column::new("pictures", "Image").formatter(move |value, _| {
                    first_picture(value, &base)
                }),
            ],
            Resource::Brands => vec![
                Column::new("name", "Name"),
                Column::new("url_text", "URL text"),
                Column::new("show_on_navbar", "Navbar"),
                Column::new("show_on_home", "Homepage"),
                Column::new("is_active", "Status").formatter(|value, _| status(value)),
                Column::new("logo_url", "Logo").formatter(move |value, _| {
                    thumbnail(value, &base, "Brand Logo", "None")
                }),
                Column::new("pictures", "Photos").formatter(|value, _| photo_count(value)),
            ],
            Resource::Categories => vec![
                Column::new("name", "Name"),
                Column::new("url_text", "URL slug"),
                Column::new("parent_name", "Parent").unsortable(),
                Column::new("show_on_navbar", "Navbar"),
                Column::new("show_on_home", "Home"),
                Column::new("is_active", "Active").formatter(|value, _| status(value)),
                Column::new("order", "Order"),
                Column::new("image_url", "Image").formatter(move |value, _| {
                    thumbnail(value, &base, "Preview", "None")
                }),
            ],
            Resource::SizeTypes => vec![
                Column::new("name", "Name"),
                Column::new("sizes", "Sizes").formatter(|value, _| name_list(value, "")),
            ],
            Resource::Users => vec![
                Column::new("firstname", "First name"),
                Column::new("lastname", "Last name"),
                Column::new("email", "Email"),
                Column::new("role", "Role"),
                Column::new("newsletter_subscription", "Newsletter"),
                Column::new("is_email_verified", "Email verified"),
            ],
        }
    }

    /// A grid configuration for this resource.
    pub fn config(self, server_base_url: &str) -> GridConfig {
        GridConfig::new(self.columns(server_base_url))
            .data_source_url(self.path())
            .use_cookies(self.use_cookies())
            .rows_per_page(10)
            .sort(self.default_sort(), Direction::Asc)
            .declare_action(RowAction::edit("Edit"))
            .declare_action(RowAction::delete("Delete"))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|resource| resource.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Resource::ALL.iter().map(|r| r.name()).collect();
                format!("unknown resource '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

fn status(value: &Value) -> Cell {
    Cell::text(if is_truthy(value) { "Active" } else { "Inactive" })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Comma-separated `name` fields of an array of objects.
fn name_list(value: &Value, fallback: &str) -> Cell {
    let Value::Array(items) = value else {
        return Cell::text(fallback);
    };
    let names: Vec<String> = items
        .iter()
        .filter_map(|item| item.get("name"))
        .map(raw_text)
        .collect();
    Cell::text(names.join(", "))
}

fn stock(value: &Value) -> Cell {
    let Value::Array(variants) = value else {
        return Cell::text("0");
    };
    let total: i64 = variants
        .iter()
        .filter_map(|variant| variant.get("stock_quantity"))
        .filter_map(Value::as_i64)
        .sum();
    if total == 0 {
        Cell::markup(r#"<span class="out-of-stock">Out of stock</span>"#)
    } else if total <= LOW_STOCK_THRESHOLD {
        Cell::markup(format!(r#"<span class="low-stock">{} (Low)</span>"#, total))
    } else {
        Cell::text(total.to_string())
    }
}

fn thumbnail(value: &Value, base: &str, alt: &str, fallback: &str) -> Cell {
    match value.as_str() {
        Some(url) if !url.is_empty() => Cell::markup(format!(
            r#"<img src="{}" alt="{}" style="max-height: 20px;" />"#,
            html_escape::encode_double_quoted_attribute(&format!("{}{}", base, url)),
            html_escape::encode_double_quoted_attribute(alt),
        )),
        _ => Cell::text(fallback),
    }
}

fn first_picture(value: &Value, base: &str) -> Cell {
    let first = value.as_array().and_then(|pictures| pictures.first());
    match first.and_then(|picture| picture.get("image_url")).and_then(Value::as_str) {
        Some(url) => {
            let alt = first
                .and_then(|picture| picture.get("alt_text"))
                .and_then(Value::as_str)
                .filter(|alt| !alt.is_empty())
                .unwrap_or("Product image");
            thumbnail(&Value::from(url), base, alt, "No image")
        }
        None => Cell::markup(r#"<span style="color: #666;">No image</span>"#),
    }
}

fn photo_count(value: &Value) -> Cell {
    match value.as_array().map(Vec::len) {
        Some(0) | None => Cell::text("None"),
        Some(n) => Cell::text(format!("{} photo(s)", n)),
    }
}
