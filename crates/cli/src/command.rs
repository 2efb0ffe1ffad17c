//! Command-line grammar.

use thiserror::Error;

use quantumstock_auth::Permission;
use quantumstock_inventory::MovementKind;
use quantumstock_products::ProductPatch;

pub const USAGE: &str = "\
usage: quantumstock <command> [args]

commands:
  dashboard                                   dashboard stats
  low-stock                                   products at or below threshold
  top-movers [limit]                          products ranked by movement count
  movements [inbound|outbound]                movement history, newest first
  search <query>                              match name or SKU
  receive <sku> <qty> <reason> [supplier]     record inbound stock
  issue <sku> <qty> <reason> [destination]    record outbound stock
  add-product <sku> <name> <qty> <uom> <threshold> <location> [price-cents]
  update-product <sku> <field=value>...
      fields: sku name qty uom threshold location category description price
      (category, description and price accept 'none' to clear)
  delete <sku>                                delete a product and its movements";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing command\n\n{USAGE}")]
    MissingCommand,

    #[error("unknown command '{0}'\n\n{USAGE}")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}\n\n{USAGE}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("expected field=value, got '{0}'")]
    NotAnAssignment(String),

    #[error("unknown product field '{0}'")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dashboard,
    LowStock,
    TopMovers {
        limit: Option<usize>,
    },
    Movements {
        kind: Option<MovementKind>,
    },
    Search {
        query: String,
    },
    Receive {
        sku: String,
        quantity: i64,
        reason: String,
        supplier: Option<String>,
    },
    Issue {
        sku: String,
        quantity: i64,
        reason: String,
        destination: Option<String>,
    },
    AddProduct {
        sku: String,
        name: String,
        quantity: i64,
        unit_of_measure: String,
        threshold: i64,
        location: String,
        unit_price: Option<u64>,
    },
    UpdateProduct {
        sku: String,
        patch: ProductPatch,
    },
    Delete {
        sku: String,
    },
}

fn number<T: core::str::FromStr>(raw: &str) -> Result<T, UsageError> {
    raw.trim()
        .parse()
        .map_err(|_| UsageError::NotANumber(raw.to_string()))
}

fn clearable(value: &str) -> Option<String> {
    (!value.trim().eq_ignore_ascii_case("none")).then(|| value.to_string())
}

fn patch_from(assignments: &[&str]) -> Result<ProductPatch, UsageError> {
    let mut patch = ProductPatch::default();
    for assignment in assignments {
        let Some((field, value)) = assignment.split_once('=') else {
            return Err(UsageError::NotAnAssignment(assignment.to_string()));
        };
        match field.trim() {
            "sku" => patch.sku = Some(value.to_string()),
            "name" => patch.name = Some(value.to_string()),
            "qty" => patch.quantity_in_stock = Some(number(value)?),
            "uom" => patch.unit_of_measure = Some(value.to_string()),
            "threshold" => patch.low_stock_threshold = Some(number(value)?),
            "location" => patch.location = Some(value.to_string()),
            "category" => patch.category = Some(clearable(value)),
            "description" => patch.description = Some(clearable(value)),
            "price" => patch.unit_price = Some(clearable(value).map(|p| number(&p)).transpose()?),
            other => return Err(UsageError::UnknownField(other.to_string())),
        }
    }
    Ok(patch)
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(UsageError::MissingCommand);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let bad = |command: &'static str, expected: &'static str| UsageError::BadArguments { command, expected };

        match (name.as_str(), rest.as_slice()) {
            ("dashboard", []) => Ok(Self::Dashboard),
            ("low-stock", []) => Ok(Self::LowStock),
            ("top-movers", []) => Ok(Self::TopMovers { limit: None }),
            ("top-movers", [limit]) => Ok(Self::TopMovers {
                limit: Some(number(limit)?),
            }),
            ("top-movers", _) => Err(bad("top-movers", "an optional limit")),
            ("movements", []) => Ok(Self::Movements { kind: None }),
            ("movements", ["inbound"]) => Ok(Self::Movements {
                kind: Some(MovementKind::Inbound),
            }),
            ("movements", ["outbound"]) => Ok(Self::Movements {
                kind: Some(MovementKind::Outbound),
            }),
            ("movements", _) => Err(bad("movements", "inbound, outbound or nothing")),
            ("search", [query]) => Ok(Self::Search {
                query: query.to_string(),
            }),
            ("search", _) => Err(bad("search", "a query")),
            ("receive", [sku, qty, reason, extra @ ..]) if extra.len() <= 1 => Ok(Self::Receive {
                sku: sku.to_string(),
                quantity: number(qty)?,
                reason: reason.to_string(),
                supplier: extra.first().map(|s| s.to_string()),
            }),
            ("receive", _) => Err(bad("receive", "<sku> <qty> <reason> [supplier]")),
            ("issue", [sku, qty, reason, extra @ ..]) if extra.len() <= 1 => Ok(Self::Issue {
                sku: sku.to_string(),
                quantity: number(qty)?,
                reason: reason.to_string(),
                destination: extra.first().map(|s| s.to_string()),
            }),
            ("issue", _) => Err(bad("issue", "<sku> <qty> <reason> [destination]")),
            ("add-product", [sku, name, qty, uom, threshold, location, extra @ ..]) if extra.len() <= 1 => {
                Ok(Self::AddProduct {
                    sku: sku.to_string(),
                    name: name.to_string(),
                    quantity: number(qty)?,
                    unit_of_measure: uom.to_string(),
                    threshold: number(threshold)?,
                    location: location.to_string(),
                    unit_price: extra.first().map(|p| number(p)).transpose()?,
                })
            }
            ("add-product", _) => Err(bad(
                "add-product",
                "<sku> <name> <qty> <uom> <threshold> <location> [price-cents]",
            )),
            ("update-product", [sku, assignments @ ..]) => {
                let patch = patch_from(assignments)?;
                if patch.is_empty() {
                    return Err(bad("update-product", "<sku> and at least one field=value"));
                }
                Ok(Self::UpdateProduct {
                    sku: sku.to_string(),
                    patch,
                })
            }
            ("update-product", _) => Err(bad("update-product", "<sku> and at least one field=value")),
            ("delete", [sku]) => Ok(Self::Delete { sku: sku.to_string() }),
            ("delete", _) => Err(bad("delete", "a SKU")),
            (other, _) => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }

    /// Permission the signed-in user needs to run this command.
    pub fn required_permission(&self) -> Permission {
        match self {
            Self::Dashboard
            | Self::LowStock
            | Self::TopMovers { .. }
            | Self::Movements { .. }
            | Self::Search { .. } => Permission::INVENTORY_READ,
            Self::Receive { .. } | Self::Issue { .. } => Permission::MOVEMENTS_RECORD,
            Self::AddProduct { .. } => Permission::PRODUCTS_CREATE,
            Self::UpdateProduct { .. } => Permission::PRODUCTS_UPDATE,
            Self::Delete { .. } => Permission::PRODUCTS_DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_read_commands() {
        assert_eq!(Command::parse(&args(&["dashboard"])), Ok(Command::Dashboard));
        assert_eq!(
            Command::parse(&args(&["top-movers", "3"])),
            Ok(Command::TopMovers { limit: Some(3) })
        );
        assert_eq!(
            Command::parse(&args(&["movements", "outbound"])),
            Ok(Command::Movements {
                kind: Some(MovementKind::Outbound)
            })
        );
    }

    #[test]
    fn parses_movement_commands_with_optional_party() {
        assert_eq!(
            Command::parse(&args(&["issue", "SKU001", "5", "Customer order"])),
            Ok(Command::Issue {
                sku: "SKU001".to_string(),
                quantity: 5,
                reason: "Customer order".to_string(),
                destination: None,
            })
        );
        assert_eq!(
            Command::parse(&args(&["receive", "SKU004", "20", "Restock", "Paper Co"])),
            Ok(Command::Receive {
                sku: "SKU004".to_string(),
                quantity: 20,
                reason: "Restock".to_string(),
                supplier: Some("Paper Co".to_string()),
            })
        );
    }

    #[test]
    fn parses_add_product_with_price() {
        let cmd = Command::parse(&args(&[
            "add-product", "SKU005", "Desk Lamp", "12", "units", "4", "D1-A1", "3499",
        ]))
        .unwrap();
        match cmd {
            Command::AddProduct { unit_price, threshold, .. } => {
                assert_eq!(unit_price, Some(3_499));
                assert_eq!(threshold, 4);
            }
            other => panic!("expected AddProduct, got {other:?}"),
        }
    }

    #[test]
    fn parses_update_product_assignments() {
        let cmd = Command::parse(&args(&[
            "update-product", "SKU004", "qty=40", "category=none", "price=1399",
        ]))
        .unwrap();
        assert_eq!(
            cmd,
            Command::UpdateProduct {
                sku: "SKU004".to_string(),
                patch: ProductPatch {
                    quantity_in_stock: Some(40),
                    category: Some(None),
                    unit_price: Some(Some(1_399)),
                    ..ProductPatch::default()
                },
            }
        );
        assert_eq!(cmd.required_permission(), Permission::PRODUCTS_UPDATE);
    }

    #[test]
    fn update_product_needs_a_field() {
        assert!(matches!(
            Command::parse(&args(&["update-product", "SKU004"])),
            Err(UsageError::BadArguments { .. })
        ));
        assert_eq!(
            Command::parse(&args(&["update-product", "SKU004", "colour=red"])),
            Err(UsageError::UnknownField("colour".to_string()))
        );
        assert_eq!(
            Command::parse(&args(&["update-product", "SKU004", "qty"])),
            Err(UsageError::NotAnAssignment("qty".to_string()))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse(&[]), Err(UsageError::MissingCommand));
        assert!(matches!(
            Command::parse(&args(&["explode"])),
            Err(UsageError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse(&args(&["issue", "SKU001", "five", "order"])),
            Err(UsageError::NotANumber(_))
        ));
        assert!(matches!(
            Command::parse(&args(&["delete"])),
            Err(UsageError::BadArguments { .. })
        ));
    }

    #[test]
    fn writes_need_stronger_permissions_than_reads() {
        assert_eq!(Command::Dashboard.required_permission(), Permission::INVENTORY_READ);
        assert_eq!(
            Command::Delete { sku: "X".to_string() }.required_permission(),
            Permission::PRODUCTS_DELETE
        );
    }
}
