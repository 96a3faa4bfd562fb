//! Spock administrative statement templates.
//!
//! Each function renders one statement. Names, connection strings and
//! other text values are emitted as escaped SQL string literals; timeouts
//! are emitted as integers. Arguments documented as expressions are
//! inserted verbatim so they can carry step output placeholders.

/// Options for [`sub_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionOptions {
    /// Copy the provider's schema when the subscription starts.
    pub synchronize_structure: bool,
    /// Copy the provider's existing rows when the subscription starts.
    pub synchronize_data: bool,
    /// Start replicating immediately.
    pub enabled: bool,
}

impl Default for SubscriptionOptions {
    fn default() -> Self {
        Self {
            synchronize_structure: true,
            synchronize_data: true,
            enabled: true,
        }
    }
}

/// Quote `value` as a SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Register a node with `spock.node_create`.
pub fn node_create(node_name: &str, dsn: &str, location: &str, country: &str) -> String {
    format!(
        "SELECT spock.node_create(\n    node_name => {},\n    dsn => {},\n    location => {},\n    country => {}\n);",
        quote_literal(node_name),
        quote_literal(dsn),
        quote_literal(location),
        quote_literal(country)
    )
}

/// Remove a node registration.
pub fn node_drop(node_name: &str) -> String {
    format!(
        "SELECT spock.node_drop(node_name => {});",
        quote_literal(node_name)
    )
}

/// Create a subscription to the node reachable at `provider_dsn`.
pub fn sub_create(
    subscription_name: &str,
    provider_dsn: &str,
    replication_sets: &[String],
    options: SubscriptionOptions,
) -> String {
    let sets: Vec<String> = replication_sets.iter().map(|s| quote_literal(s)).collect();

    format!(
        "SELECT spock.sub_create(\n    subscription_name => {},\n    provider_dsn => {},\n    replication_sets => ARRAY[{}],\n    synchronize_structure => {},\n    synchronize_data => {},\n    forward_origins => ARRAY[]::text[],\n    apply_delay => '0'::interval,\n    force_text_transfer => false,\n    enabled => {}\n);",
        quote_literal(subscription_name),
        quote_literal(provider_dsn),
        sets.join(", "),
        options.synchronize_structure,
        options.synchronize_data,
        options.enabled
    )
}

/// Drop a subscription.
pub fn sub_drop(subscription_name: &str) -> String {
    format!(
        "SELECT spock.sub_drop(subscription_name => {});",
        quote_literal(subscription_name)
    )
}

/// Emit a sync marker; the result is the marker's log position.
pub fn sync_event() -> String {
    "SELECT spock.sync_event();".to_string()
}

/// Block until the sync marker `lsn_expr` from `origin` has been applied.
///
/// `lsn_expr` is an expression, usually a step output placeholder.
pub fn wait_for_sync_event(origin: &str, lsn_expr: &str, timeout_ms: u64) -> String {
    format!(
        "CALL spock.wait_for_sync_event(true, {}, {}::pg_lsn, {});",
        quote_literal(origin),
        lsn_expr,
        timeout_ms
    )
}

/// Block until the apply worker of a subscription is running.
///
/// `subscription_expr` is an expression, usually a step output placeholder.
pub fn wait_for_apply_worker(subscription_expr: &str, timeout_ms: u64) -> String {
    format!(
        "SELECT spock.wait_for_apply_worker({}, {});",
        subscription_expr, timeout_ms
    )
}

/// Create a logical replication slot using `plugin`.
pub fn create_logical_slot(slot_name: &str, plugin: &str) -> String {
    format!(
        "SELECT pg_create_logical_replication_slot({}, {});",
        quote_literal(slot_name),
        quote_literal(plugin)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_literal_doubles_quotes() {
        assert_eq!(quote_literal("O'Hare"), "'O''Hare'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn node_create_names_every_argument() {
        let sql = node_create("n3", "host=h port=1", "Los Angeles", "USA");
        assert!(sql.starts_with("SELECT spock.node_create("));
        assert!(sql.contains("node_name => 'n3'"));
        assert!(sql.contains("dsn => 'host=h port=1'"));
        assert!(sql.contains("location => 'Los Angeles'"));
        assert!(sql.ends_with("country => 'USA'\n);"));
    }

    #[test]
    fn sub_create_renders_sets_and_flags() {
        let sets = vec!["default".to_string(), "ddl_sql".to_string()];
        let sql = sub_create(
            "sub_n2_n3",
            "host=n2",
            &sets,
            SubscriptionOptions {
                synchronize_structure: false,
                synchronize_data: false,
                enabled: false,
            },
        );
        assert!(sql.contains("subscription_name => 'sub_n2_n3'"));
        assert!(sql.contains("replication_sets => ARRAY['default', 'ddl_sql']"));
        assert!(sql.contains("synchronize_structure => false"));
        assert!(sql.contains("synchronize_data => false"));
        assert!(sql.contains("forward_origins => ARRAY[]::text[]"));
        assert!(sql.contains("enabled => false"));
    }

    #[test]
    fn subscription_options_default_to_full_sync() {
        let options = SubscriptionOptions::default();
        assert!(options.synchronize_structure);
        assert!(options.synchronize_data);
        assert!(options.enabled);
    }

    #[test]
    fn drop_statements() {
        assert_eq!(
            sub_drop("sub_n1_n3"),
            "SELECT spock.sub_drop(subscription_name => 'sub_n1_n3');"
        );
        assert_eq!(
            node_drop("n3"),
            "SELECT spock.node_drop(node_name => 'n3');"
        );
    }

    #[test]
    fn wait_statements_keep_expressions_verbatim() {
        assert_eq!(
            wait_for_sync_event("n2", "$7", 1_200_000),
            "CALL spock.wait_for_sync_event(true, 'n2', $7::pg_lsn, 1200000);"
        );
        assert_eq!(
            wait_for_apply_worker("$2", 1000),
            "SELECT spock.wait_for_apply_worker($2, 1000);"
        );
    }

    #[test]
    fn slot_statement() {
        assert_eq!(
            create_logical_slot("spk_pgedge_n2_sub_n2_n3", "spock_output"),
            "SELECT pg_create_logical_replication_slot('spk_pgedge_n2_sub_n2_n3', 'spock_output');"
        );
    }
}
