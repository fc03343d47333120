//! Plugin registry: discovery via registration hooks, id-keyed storage, and
//! the independent enabled/disabled membership set.

use crate::error::{Result, TtsError};
use crate::plugin::{PluginHook, TtsPlugin};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Registry of all discovered TTS plugins, keyed by id.
///
/// Backends and everything related to them are created through
/// [`TtsPlugin`] instances; the registry finds, stores, lists, enables,
/// disables and hands out those plugins. The enabled set is independent of
/// what is loaded: it lets a host curate which installed plugins are
/// surfaced to end users. Single-threaded by design; hosts needing
/// concurrent access wrap it in their own lock.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn TtsPlugin>>,
    enabled: HashSet<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover plugins by invoking every registration hook and storing each
    /// returned plugin. Hooks returning `None` are silently skipped.
    ///
    /// All discovered plugins start disabled. With `validate` set, a hook
    /// whose name does not conform to the hook contract fails the whole
    /// load. Within one load each id is first-write-wins; real
    /// de-duplication is the job of id uniqueness. Discovery that produces
    /// zero plugins fails with [`TtsError::NoPluginsFound`], since the host
    /// ships at least one bundled plugin and an empty result means a broken
    /// installation.
    pub fn load_plugins(&mut self, hooks: &[PluginHook], validate: bool) -> Result<()> {
        debug!("loading TTS plugins from {} hooks", hooks.len());
        if validate {
            for hook in hooks {
                if !hook.is_well_formed() {
                    return Err(TtsError::MalformedHook(hook.name.to_string()));
                }
            }
        }
        let mut found = 0usize;
        for hook in hooks {
            let Some(plugin) = (hook.register)() else {
                debug!(hook = hook.name, "hook registered no plugin, skipping");
                continue;
            };
            found += 1;
            // First write wins within a load: hook order is discovery order
            // and not stable across environments, so a later claimant of an
            // id never displaces an earlier one.
            if let Some(existing) = self.plugins.get(plugin.id()) {
                if !Arc::ptr_eq(existing, &plugin) {
                    debug!(plugin = plugin.id(), hook = hook.name, "id already taken, skipping");
                }
                continue;
            }
            self.register(plugin)?;
        }
        if found == 0 {
            return Err(TtsError::NoPluginsFound);
        }
        debug!("total TTS plugins registered: {}", self.plugins.len());
        Ok(())
    }

    /// Register one plugin under its id, leaving it disabled.
    ///
    /// Re-registering the very same plugin instance is a no-op; a different
    /// plugin claiming an id already in use is a hard error. The asymmetry
    /// distinguishes "same backend registered again" from a genuine id
    /// collision.
    pub fn register(&mut self, plugin: Arc<dyn TtsPlugin>) -> Result<()> {
        let id = plugin.id().to_string();
        if let Some(existing) = self.plugins.get(&id) {
            if Arc::ptr_eq(existing, &plugin) {
                return Ok(());
            }
            return Err(TtsError::DuplicateId(id));
        }
        debug!(plugin = %id, "registered TTS plugin");
        self.plugins.insert(id, plugin);
        Ok(())
    }

    /// Exact lookup by id, regardless of enabled/disabled status.
    pub fn get_plugin(&self, id: &str) -> Result<Arc<dyn TtsPlugin>> {
        self.plugins
            .get(id)
            .cloned()
            .ok_or_else(|| TtsError::PluginNotFound(id.to_string()))
    }

    /// The set of plugin ids. Default: only enabled ids. `only_disabled`
    /// returns the complement within known ids; `list_all` returns every
    /// known id. Passing both flags is a caller contract violation.
    pub fn list_plugin_ids(&self, only_disabled: bool, list_all: bool) -> Result<BTreeSet<String>> {
        if only_disabled && list_all {
            return Err(TtsError::InvalidArguments(
                "only_disabled and list_all cannot both be set".to_string(),
            ));
        }
        let ids = self
            .plugins
            .keys()
            .filter(|id| list_all || (self.is_enabled(id) != only_disabled))
            .cloned()
            .collect();
        Ok(ids)
    }

    /// Pure membership test against the enabled set. An unknown id is
    /// simply not enabled.
    pub fn is_enabled(&self, plugin_id: &str) -> bool {
        self.enabled.contains(plugin_id)
    }

    /// Enable a plugin for inclusion in the default listing. Idempotent.
    ///
    /// Enablement only governs visibility; it has no effect on backends
    /// already constructed from the plugin.
    pub fn enable(&mut self, plugin_id: &str) -> Result<()> {
        if !self.plugins.contains_key(plugin_id) {
            return Err(TtsError::PluginNotFound(plugin_id.to_string()));
        }
        self.enabled.insert(plugin_id.to_string());
        debug!(plugin = plugin_id, "enabled TTS plugin");
        Ok(())
    }

    /// Disable a plugin, excluding it from the default listing. Idempotent.
    ///
    /// Does not affect existing backend instances in any way; stopping them
    /// remains the host's responsibility.
    pub fn disable(&mut self, plugin_id: &str) -> Result<()> {
        if !self.plugins.contains_key(plugin_id) {
            return Err(TtsError::PluginNotFound(plugin_id.to_string()));
        }
        self.enabled.remove(plugin_id);
        debug!(plugin = plugin_id, "disabled TTS plugin");
        Ok(())
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<BTreeSet<_>>())
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TtsBackend;
    use crate::settings::{SettingsMap, SettingsSpec, TtsSettings};
    use std::sync::Arc;

    /// Minimal plugin stub; only `id` matters to the registry.
    #[derive(Debug)]
    struct StubPlugin {
        id: &'static str,
    }

    impl TtsPlugin for StubPlugin {
        fn id(&self) -> &str {
            self.id
        }

        fn get_display_name(&self, _locale: &str) -> String {
            format!("Stub {}", self.id)
        }

        fn make_settings(
            &self,
            _from_dict: Option<&SettingsMap>,
        ) -> crate::Result<Box<dyn TtsSettings>> {
            unimplemented!("not needed for registry tests")
        }

        fn make_backend(
            &self,
            _settings: Box<dyn TtsSettings>,
        ) -> crate::Result<Box<dyn TtsBackend>> {
            unimplemented!("not needed for registry tests")
        }

        fn get_settings_spec(&self) -> SettingsSpec {
            SettingsSpec::new()
        }

        fn get_setting_display_name(&self, name: &str, _locale: &str) -> crate::Result<String> {
            Err(TtsError::SettingNotFound(name.to_string()))
        }

        fn get_setting_description(&self, name: &str, _locale: &str) -> crate::Result<String> {
            Err(TtsError::SettingNotFound(name.to_string()))
        }

        fn get_supported_locales(&self) -> BTreeSet<String> {
            BTreeSet::new()
        }
    }

    fn stub(id: &'static str) -> Arc<dyn TtsPlugin> {
        Arc::new(StubPlugin { id })
    }

    fn hook_a() -> Option<Arc<dyn TtsPlugin>> {
        Some(stub("a_v1"))
    }

    fn hook_b() -> Option<Arc<dyn TtsPlugin>> {
        Some(stub("b_v1"))
    }

    fn hook_none() -> Option<Arc<dyn TtsPlugin>> {
        None
    }

    fn loaded_registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        let hooks = [
            PluginHook::new("a::register_tts_plugin", hook_a),
            PluginHook::new("b::register_tts_plugin", hook_b),
            PluginHook::new("skipped::register_tts_plugin", hook_none),
        ];
        registry.load_plugins(&hooks, true).unwrap();
        registry
    }

    #[test]
    fn load_plugins_stores_all_returned_plugins() {
        let registry = loaded_registry();
        let all = registry.list_plugin_ids(false, true).unwrap();
        assert_eq!(all, ["a_v1".to_string(), "b_v1".to_string()].into());
    }

    #[test]
    fn load_plugins_all_start_disabled() {
        let registry = loaded_registry();
        assert!(registry.list_plugin_ids(false, false).unwrap().is_empty());
        assert!(!registry.is_enabled("a_v1"));
        assert!(!registry.is_enabled("b_v1"));
    }

    #[test]
    fn load_plugins_zero_found_is_fatal() {
        let mut registry = PluginRegistry::new();
        let hooks = [PluginHook::new("skipped::register_tts_plugin", hook_none)];
        let err = registry.load_plugins(&hooks, true).unwrap_err();
        assert!(matches!(err, TtsError::NoPluginsFound));
    }

    #[test]
    fn load_plugins_empty_hook_list_is_fatal() {
        let mut registry = PluginRegistry::new();
        let err = registry.load_plugins(&[], true).unwrap_err();
        assert!(matches!(err, TtsError::NoPluginsFound));
    }

    #[test]
    fn load_plugins_malformed_hook_rejected_when_validating() {
        let mut registry = PluginRegistry::new();
        let hooks = [PluginHook::new("a::not_a_registration_hook", hook_a)];
        let err = registry.load_plugins(&hooks, true).unwrap_err();
        assert!(matches!(err, TtsError::MalformedHook(_)));
    }

    #[test]
    fn load_plugins_malformed_hook_allowed_without_validation() {
        let mut registry = PluginRegistry::new();
        let hooks = [PluginHook::new("a::not_a_registration_hook", hook_a)];
        registry.load_plugins(&hooks, false).unwrap();
        assert!(registry.get_plugin("a_v1").is_ok());
    }

    #[test]
    fn load_plugins_first_write_wins_within_a_load() {
        let mut registry = PluginRegistry::new();
        let hooks = [
            PluginHook::new("a::register_tts_plugin", hook_a),
            PluginHook::new("other_a::register_tts_plugin", hook_a),
        ];
        registry.load_plugins(&hooks, true).unwrap();
        assert_eq!(registry.list_plugin_ids(false, true).unwrap().len(), 1);
    }

    #[test]
    fn register_same_instance_twice_is_noop() {
        let mut registry = PluginRegistry::new();
        let plugin = stub("a_v1");
        registry.register(Arc::clone(&plugin)).unwrap();
        registry.register(Arc::clone(&plugin)).unwrap();
        assert_eq!(registry.list_plugin_ids(false, true).unwrap().len(), 1);
    }

    #[test]
    fn register_conflicting_instance_same_id_is_error() {
        let mut registry = PluginRegistry::new();
        registry.register(stub("a_v1")).unwrap();
        let err = registry.register(stub("a_v1")).unwrap_err();
        assert!(matches!(err, TtsError::DuplicateId(_)));
        assert!(err.to_string().contains("a_v1"));
    }

    #[test]
    fn get_plugin_ignores_enabled_status() {
        let registry = loaded_registry();
        assert_eq!(registry.get_plugin("a_v1").unwrap().id(), "a_v1");
    }

    #[test]
    fn get_plugin_unknown_id_is_error() {
        let registry = loaded_registry();
        let err = registry.get_plugin("nonexistent").err().unwrap();
        assert!(matches!(err, TtsError::PluginNotFound(_)));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn enable_and_disable_are_idempotent() {
        let mut registry = loaded_registry();
        registry.enable("a_v1").unwrap();
        registry.enable("a_v1").unwrap();
        assert!(registry.is_enabled("a_v1"));
        registry.disable("a_v1").unwrap();
        registry.disable("a_v1").unwrap();
        assert!(!registry.is_enabled("a_v1"));
    }

    #[test]
    fn enable_disable_unknown_id_is_error_and_state_unchanged() {
        let mut registry = loaded_registry();
        registry.enable("a_v1").unwrap();
        let before = format!("{registry:?}");
        assert!(matches!(
            registry.enable("nonexistent").unwrap_err(),
            TtsError::PluginNotFound(_)
        ));
        assert!(matches!(
            registry.disable("nonexistent").unwrap_err(),
            TtsError::PluginNotFound(_)
        ));
        assert_eq!(format!("{registry:?}"), before);
    }

    #[test]
    fn disable_before_enable_is_fine() {
        let mut registry = loaded_registry();
        registry.disable("b_v1").unwrap();
        assert!(!registry.is_enabled("b_v1"));
    }

    #[test]
    fn is_enabled_unknown_id_is_false_not_error() {
        let registry = loaded_registry();
        assert!(!registry.is_enabled("nonexistent"));
    }

    #[test]
    fn listing_scenario_enabled_disabled_all() {
        let mut registry = loaded_registry();
        registry.enable("a_v1").unwrap();
        assert_eq!(
            registry.list_plugin_ids(false, false).unwrap(),
            ["a_v1".to_string()].into()
        );
        assert_eq!(
            registry.list_plugin_ids(true, false).unwrap(),
            ["b_v1".to_string()].into()
        );
        assert_eq!(
            registry.list_plugin_ids(false, true).unwrap(),
            ["a_v1".to_string(), "b_v1".to_string()].into()
        );
    }

    #[test]
    fn listing_partition_is_consistent() {
        let mut registry = loaded_registry();
        registry.enable("b_v1").unwrap();
        let enabled = registry.list_plugin_ids(false, false).unwrap();
        let disabled = registry.list_plugin_ids(true, false).unwrap();
        let all = registry.list_plugin_ids(false, true).unwrap();
        let union: BTreeSet<String> = enabled.union(&disabled).cloned().collect();
        assert_eq!(union, all);
        assert!(enabled.is_disjoint(&disabled));
    }

    #[test]
    fn listing_both_flags_is_error() {
        let registry = loaded_registry();
        let err = registry.list_plugin_ids(true, true).unwrap_err();
        assert!(matches!(err, TtsError::InvalidArguments(_)));
    }
}
