//! Cluster membership workflows.
//!
//! Both workflows are built from an explicit [`ClusterConfig`] and involve
//! three nodes: the `joining` node being added or removed, a `source` node
//! the joining node copies its initial state from, and a `peer` node.
//!
//! Subscriptions are named `sub_<provider>_<subscriber>`.

use std::fmt;
use std::str::FromStr;

use crate::config::{validate, ClusterConfig, NodeConfig};
use crate::error::{Result, SpockctrlError};
use crate::sql::templates::{
    create_logical_slot, node_create, node_drop, sub_create, sub_drop, sync_event,
    wait_for_apply_worker, wait_for_sync_event,
};
use crate::sql::SubscriptionOptions;
use crate::steps::Step;

/// Output plugin used for the joining node's replication slot.
const OUTPUT_PLUGIN: &str = "spock_output";

/// The membership change to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workflow {
    /// Add the joining node to the cluster.
    #[default]
    AddNode,
    /// Remove the joining node from the cluster.
    RemoveNode,
}

impl Workflow {
    /// Build this workflow's steps for `config`.
    pub fn steps(&self, config: &ClusterConfig) -> Result<Vec<Step>> {
        match self {
            Workflow::AddNode => add_node_workflow(config),
            Workflow::RemoveNode => remove_node_workflow(config),
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Workflow::AddNode => "add-node",
            Workflow::RemoveNode => "remove-node",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Workflow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add-node" => Ok(Self::AddNode),
            "remove-node" => Ok(Self::RemoveNode),
            _ => Err(format!("unknown workflow: {}", s)),
        }
    }
}

struct Member<'a> {
    name: &'a str,
    node: &'a NodeConfig,
}

impl Member<'_> {
    fn dsn(&self) -> String {
        self.node.dsn()
    }
}

struct Members<'a> {
    peer: Member<'a>,
    source: Member<'a>,
    joining: Member<'a>,
}

fn members(config: &ClusterConfig) -> Result<Members<'_>> {
    validate(config)?;

    Ok(Members {
        peer: member(config, &config.roles.peer)?,
        source: member(config, &config.roles.source)?,
        joining: member(config, &config.roles.joining)?,
    })
}

fn member<'a>(config: &'a ClusterConfig, name: &str) -> Result<Member<'a>> {
    config
        .nodes
        .get_key_value(name)
        .map(|(name, node)| Member {
            name: name.as_str(),
            node,
        })
        .ok_or_else(|| SpockctrlError::ConfigValidationError {
            message: format!("Node '{}' is not configured", name),
        })
}

fn subscription_name(provider: &Member<'_>, subscriber: &Member<'_>) -> String {
    format!("sub_{}_{}", provider.name, subscriber.name)
}

/// Placeholder referring to the output of step `index`.
fn output_of(index: usize) -> String {
    format!("${}", index)
}

/// Steps that add the joining node to the cluster.
///
/// The joining node subscribes to both existing nodes and they to it. Two
/// sync barriers make sure the joining node only starts receiving changes
/// from a node once that node is consistent with the rest of the cluster.
///
/// # Errors
///
/// Returns `ConfigValidationError` if `config` does not validate.
pub fn add_node_workflow(config: &ClusterConfig) -> Result<Vec<Step>> {
    let Members {
        peer,
        source,
        joining,
    } = members(config)?;
    let sets = &config.replication_sets;
    let slot = format!(
        "spk_{}_{}_{}",
        source.node.dbname,
        source.name,
        subscription_name(&source, &joining)
    );

    Ok(vec![
        // 1
        Step::new(
            format!("Create node {} in the cluster", joining.name),
            node_create(joining.name, &joining.dsn(), &config.location, &config.country),
            joining.dsn(),
        ),
        // 2
        Step::new(
            format!(
                "On {}, create a subscription ({}) for replicating data from {} to {}",
                peer.name,
                subscription_name(&joining, &peer),
                joining.name,
                peer.name
            ),
            sub_create(
                &subscription_name(&joining, &peer),
                &joining.dsn(),
                sets,
                SubscriptionOptions::default(),
            ),
            peer.dsn(),
        ),
        // 3
        Step::new(
            format!(
                "On {}, create a subscription ({}) for replicating data from {} to {} without synchronizing structure",
                source.name,
                subscription_name(&joining, &source),
                joining.name,
                source.name
            ),
            sub_create(
                &subscription_name(&joining, &source),
                &joining.dsn(),
                sets,
                SubscriptionOptions {
                    synchronize_structure: false,
                    ..Default::default()
                },
            ),
            source.dsn(),
        ),
        // 4
        Step::new(
            format!("Wait for the apply worker to complete on {}", source.name),
            wait_for_apply_worker(&output_of(2), config.apply_worker_timeout_ms),
            source.dsn(),
        )
        .ignorable(),
        // 5
        Step::new(
            format!(
                "On {}, create a subscription ({}) for replicating data from {} to {} and keep it disabled",
                joining.name,
                subscription_name(&source, &joining),
                source.name,
                joining.name
            ),
            sub_create(
                &subscription_name(&source, &joining),
                &source.dsn(),
                sets,
                SubscriptionOptions {
                    synchronize_structure: false,
                    synchronize_data: false,
                    enabled: false,
                },
            ),
            joining.dsn(),
        ),
        // 6
        Step::new(
            format!(
                "On {}, create a logical replication slot for replicating data from {} to {}",
                source.name, source.name, joining.name
            ),
            create_logical_slot(&slot, OUTPUT_PLUGIN),
            source.dsn(),
        ),
        // 7
        Step::new(
            format!("Trigger a synchronization event on {}", source.name),
            sync_event(),
            source.dsn(),
        ),
        // 8
        Step::new(
            format!(
                "On {}, wait for the synchronization event triggered by {}",
                peer.name, source.name
            ),
            wait_for_sync_event(source.name, &output_of(7), config.sync_event_timeout_ms),
            peer.dsn(),
        ),
        // 9
        Step::new(
            format!(
                "On {}, create a subscription ({}) for replicating data from {} to {}",
                joining.name,
                subscription_name(&peer, &joining),
                peer.name,
                joining.name
            ),
            sub_create(
                &subscription_name(&peer, &joining),
                &peer.dsn(),
                sets,
                SubscriptionOptions::default(),
            ),
            joining.dsn(),
        ),
        // 10
        Step::new(
            format!("Trigger a synchronization event on {}", peer.name),
            sync_event(),
            peer.dsn(),
        ),
        // 11
        Step::new(
            format!(
                "On {}, wait for the synchronization event triggered by {}",
                joining.name, peer.name
            ),
            wait_for_sync_event(peer.name, &output_of(10), config.sync_event_timeout_ms),
            joining.dsn(),
        )
        .ignorable(),
    ])
}

/// Steps that remove the joining node from the cluster.
///
/// Every step is ignorable so a partially removed node can be cleaned up by
/// running the workflow again.
///
/// # Errors
///
/// Returns `ConfigValidationError` if `config` does not validate.
pub fn remove_node_workflow(config: &ClusterConfig) -> Result<Vec<Step>> {
    let Members {
        peer,
        source,
        joining,
    } = members(config)?;

    let drop_on = |provider: &Member<'_>, subscriber: &Member<'_>| {
        let name = subscription_name(provider, subscriber);
        Step::new(
            format!("Drop subscription ({}) on {}", name, subscriber.name),
            sub_drop(&name),
            subscriber.dsn(),
        )
        .ignorable()
    };

    Ok(vec![
        drop_on(&source, &joining),
        drop_on(&peer, &joining),
        drop_on(&joining, &peer),
        drop_on(&joining, &source),
        Step::new(
            format!("Drop node {}", joining.name),
            node_drop(joining.name),
            joining.dsn(),
        )
        .ignorable(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::referenced_steps;

    #[test]
    fn add_node_has_eleven_steps() {
        let steps = add_node_workflow(&ClusterConfig::default()).unwrap();
        assert_eq!(steps.len(), 11);
    }

    #[test]
    fn add_node_ignorable_steps_are_the_two_waits() {
        let steps = add_node_workflow(&ClusterConfig::default()).unwrap();
        let ignorable: Vec<_> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_ignorable())
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(ignorable, vec![4, 11]);
    }

    #[test]
    fn add_node_placeholders_refer_to_barrier_steps() {
        let steps = add_node_workflow(&ClusterConfig::default()).unwrap();
        let refs: Vec<_> = steps
            .iter()
            .map(|s| referenced_steps(s.statement()).into_iter().collect::<Vec<_>>())
            .collect();

        assert_eq!(refs[3], vec![2]);
        assert_eq!(refs[7], vec![7]);
        assert_eq!(refs[10], vec![10]);
        assert!(steps[6].statement().contains("spock.sync_event()"));
        assert!(steps[9].statement().contains("spock.sync_event()"));
    }

    #[test]
    fn add_node_targets_follow_roles() {
        let config = ClusterConfig::default();
        let steps = add_node_workflow(&config).unwrap();
        let dsn = |name: &str| config.node(name).unwrap().dsn();

        assert_eq!(steps[0].target(), dsn("n3"));
        assert_eq!(steps[1].target(), dsn("n1"));
        assert_eq!(steps[2].target(), dsn("n2"));
        assert_eq!(steps[7].target(), dsn("n1"));
        assert_eq!(steps[10].target(), dsn("n3"));
    }

    #[test]
    fn add_node_uses_configured_values() {
        let mut config = ClusterConfig::default();
        config.location = "Paris".to_string();
        config.sync_event_timeout_ms = 5000;
        config.nodes.get_mut("n2").unwrap().dbname = "app".to_string();

        let steps = add_node_workflow(&config).unwrap();

        assert!(steps[0].statement().contains("location => 'Paris'"));
        assert!(steps[5]
            .statement()
            .contains("'spk_app_n2_sub_n2_n3', 'spock_output'"));
        assert!(steps[7].statement().ends_with("$7::pg_lsn, 5000);"));
        assert_eq!(
            steps[1].description(),
            "On n1, create a subscription (sub_n3_n1) for replicating data from n3 to n1"
        );
    }

    #[test]
    fn add_node_disabled_reverse_subscription() {
        let steps = add_node_workflow(&ClusterConfig::default()).unwrap();
        let sql = steps[4].statement();
        assert!(sql.contains("'sub_n2_n3'"));
        assert!(sql.contains("enabled => false"));
        assert!(sql.contains("synchronize_data => false"));
    }

    #[test]
    fn remove_node_drops_everything_and_ignores_errors() {
        let config = ClusterConfig::default();
        let steps = remove_node_workflow(&config).unwrap();

        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| s.is_ignorable()));
        assert_eq!(steps[0].description(), "Drop subscription (sub_n2_n3) on n3");
        assert_eq!(steps[1].description(), "Drop subscription (sub_n1_n3) on n3");
        assert_eq!(steps[2].description(), "Drop subscription (sub_n3_n1) on n1");
        assert_eq!(steps[3].description(), "Drop subscription (sub_n3_n2) on n2");
        assert_eq!(steps[4].statement(), "SELECT spock.node_drop(node_name => 'n3');");
        assert_eq!(steps[2].target(), config.node("n1").unwrap().dsn());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ClusterConfig::default();
        config.roles.joining = "n1".to_string();

        assert!(add_node_workflow(&config).is_err());
        assert!(remove_node_workflow(&config).is_err());
    }

    #[test]
    fn workflow_names_round_trip() {
        assert_eq!(Workflow::AddNode.to_string(), "add-node");
        assert_eq!("remove-node".parse::<Workflow>(), Ok(Workflow::RemoveNode));
        assert!("rebalance".parse::<Workflow>().is_err());
        assert_eq!(Workflow::default(), Workflow::AddNode);
    }
}
