use crate::display::DisplayIcon;
use crate::registry::{Plugin, Table};
use crate::search::dispatch::filter_fields;
use crate::search::PageResult;
use serde::Serialize;
use std::fmt::Write;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Cli,
    Json,
    Markdown,
    Csv,
}

/// Plugin with its tables, as listed by `tables` and the HTTP index
#[derive(Debug, Clone, Serialize)]
pub struct PluginListing {
    pub id: &'static str,
    pub name: &'static str,
    pub tables: Vec<TableListing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableListing {
    pub name: &'static str,
    pub path: &'static str,
    pub fields: &'static [&'static str],
    pub search_url: String,
    pub all_url: String,
}

/// Every plugin with its tables, in declaration order
pub fn plugin_listings() -> Vec<PluginListing> {
    Plugin::ALL
        .iter()
        .map(|&plugin| PluginListing {
            id: plugin.id(),
            name: plugin.name(),
            tables: plugin
                .tables()
                .into_iter()
                .map(|table: Table| TableListing {
                    name: table.name(),
                    path: table.path(),
                    fields: filter_fields(table),
                    search_url: table.search_url(),
                    all_url: table.all_url(),
                })
                .collect(),
        })
        .collect()
}

impl Format {
    /// Create format from string
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            "csv" => Self::Csv,
            _ => Self::Cli,
        }
    }

    /// Render one page of search results
    pub fn format_page(&self, table: Table, page: &PageResult<DisplayIcon>) -> Result<String, anyhow::Error> {
        match self {
            Self::Cli => Ok(self.page_cli(table, page)),
            Self::Json => Ok(serde_json::to_string_pretty(page)?),
            Self::Markdown => Ok(self.page_markdown(table, page)),
            Self::Csv => Ok(self.page_csv(page)),
        }
    }

    /// Render the plugin/table catalog
    pub fn format_tables(&self, plugins: &[PluginListing]) -> Result<String, anyhow::Error> {
        let mut out = String::new();
        match self {
            Self::Json => out = serde_json::to_string_pretty(plugins)?,
            Self::Cli => {
                for plugin in plugins {
                    writeln!(out, "{}", plugin.name)?;
                    for table in &plugin.tables {
                        writeln!(out, "  {:<24} /{:<24} {}", table.name, table.path, table.fields.join(", "))?;
                    }
                }
            }
            Self::Markdown => {
                writeln!(out, "# Tables")?;
                for plugin in plugins {
                    writeln!(out)?;
                    writeln!(out, "## {}", plugin.name)?;
                    writeln!(out)?;
                    for table in &plugin.tables {
                        writeln!(out, "- **{}** (`{}`): {}", table.name, table.path, table.fields.join(", "))?;
                    }
                }
            }
            Self::Csv => {
                writeln!(out, "plugin,table,path,fields")?;
                for plugin in plugins {
                    for table in &plugin.tables {
                        writeln!(
                            out,
                            "{},{},{},{}",
                            escape_csv(plugin.name),
                            escape_csv(table.name),
                            escape_csv(table.path),
                            escape_csv(&table.fields.join(" "))
                        )?;
                    }
                }
            }
        }
        Ok(out)
    }

    fn page_cli(&self, table: Table, page: &PageResult<DisplayIcon>) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}: {} results, page {} of {}\n",
            table.name(),
            page.total_count,
            page.page,
            page.total_pages
        ));
        out.push_str(&format!("{:<32} {:<40} Description\n", "ID", "Label"));
        out.push_str(&"-".repeat(100));
        out.push('\n');

        for icon in &page.items {
            out.push_str(&format!("{:<32} {:<40} {}\n", icon.id, icon.label, icon.description));
        }
        out
    }

    fn page_markdown(&self, table: Table, page: &PageResult<DisplayIcon>) -> String {
        let mut out = format!("# {}\n\n", table.name());
        out.push_str(&format!(
            "{} results, page {} of {}\n\n",
            page.total_count, page.page, page.total_pages
        ));

        for (i, icon) in page.items.iter().enumerate() {
            let n = page.offset() + i as u64 + 1;
            out.push_str(&format!("{}. [{}]({}): {}\n", n, icon.label, icon.url, icon.description));
        }
        out
    }

    fn page_csv(&self, page: &PageResult<DisplayIcon>) -> String {
        let mut out = String::from("id,label,description,url\n");
        for icon in &page.items {
            out.push_str(&format!(
                "{},{},{},{}\n",
                escape_csv(&icon.id),
                escape_csv(&icon.label),
                escape_csv(&icon.description),
                escape_csv(&icon.url)
            ));
        }
        out
    }
}

/// Quote a CSV field when it contains a separator, quote or newline
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
