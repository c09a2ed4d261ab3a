use nova_analytics::plugins::MemoryAnalyticsPlugin;
use nova_analytics::{
    AnalyticsCategory, AnalyticsError, AnalyticsEvent, AnalyticsPlugin, Category, CategoryPlugin,
    PluginDescriptor, PluginHandle, PluginLookup, PluginLookupKind, PluginRegistry,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

/// Counts lookups before delegating to a real registry
#[derive(Default)]
struct SpyLookup {
    registry: PluginRegistry,
    default_lookups: AtomicUsize,
    key_lookups: AtomicUsize,
}

impl SpyLookup {
    fn default_lookups(&self) -> usize {
        self.default_lookups.load(Ordering::SeqCst)
    }

    fn key_lookups(&self) -> usize {
        self.key_lookups.load(Ordering::SeqCst)
    }
}

impl PluginLookup for SpyLookup {
    fn default_plugin_for_category(&self, category: Category) -> Option<PluginHandle> {
        self.default_lookups.fetch_add(1, Ordering::SeqCst);
        self.registry.default_plugin_for_category(category)
    }

    fn plugin_by_key(&self, key: &str) -> Option<PluginHandle> {
        self.key_lookups.fetch_add(1, Ordering::SeqCst);
        self.registry.plugin_by_key(key)
    }
}

struct StoragePlugin {
    descriptor: PluginDescriptor,
}

impl CategoryPlugin for StoragePlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

fn spy_with_memory() -> (Arc<SpyLookup>, Arc<MemoryAnalyticsPlugin>) {
    let spy = Arc::new(SpyLookup::default());
    let memory = Arc::new(MemoryAnalyticsPlugin::new("memory"));
    spy.registry.register_analytics_plugin(memory.clone()).unwrap();
    (spy, memory)
}

#[test]
fn disabled_dispatcher_never_looks_up_plugins() {
    let (spy, memory) = spy_with_memory();
    let analytics = AnalyticsCategory::new(spy.clone());
    analytics.disable();

    analytics.record("a").unwrap();
    analytics.record_with_plugin("b", "memory").unwrap();
    analytics.record_event(AnalyticsEvent::new("c")).unwrap();
    analytics
        .record_event_with_plugin(AnalyticsEvent::new("d"), "memory")
        .unwrap();

    assert_eq!(spy.default_lookups(), 0);
    assert_eq!(spy.key_lookups(), 0);
    assert!(memory.is_empty());
}

#[test]
fn record_by_name_forwards_exactly_once() {
    let (spy, memory) = spy_with_memory();
    let analytics = AnalyticsCategory::new(spy.clone());

    analytics.record("x").unwrap();

    let events = memory.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name(), "x");
    assert_eq!(spy.default_lookups(), 1);
    assert_eq!(spy.key_lookups(), 0);
}

#[test]
fn key_lookups_never_consult_category_default() {
    let (spy, memory) = spy_with_memory();
    let analytics = AnalyticsCategory::new(spy.clone());

    analytics.record_with_plugin("x", "memory").unwrap();
    analytics
        .record_event_with_plugin(AnalyticsEvent::new("y"), "memory")
        .unwrap();
    let _ = analytics.record_event_with_plugin(AnalyticsEvent::new("z"), "missing");

    assert_eq!(spy.default_lookups(), 0);
    assert_eq!(spy.key_lookups(), 3);
    assert_eq!(memory.len(), 2);
}

#[test]
fn missing_category_plugin_is_an_error() {
    let spy = Arc::new(SpyLookup::default());
    let analytics = AnalyticsCategory::new(spy.clone());

    let err = analytics.record("x").unwrap_err();
    assert!(matches!(err, AnalyticsError::PluginNotFound { .. }));
    assert!(err.to_string().starts_with("a valid plugin is required"));
}

#[test]
fn plugin_without_record_capability_is_an_error() {
    let spy = Arc::new(SpyLookup::default());
    spy.registry
        .register_plugin(Arc::new(StoragePlugin {
            descriptor: PluginDescriptor::new("k", "Storage", Category::Storage),
        }))
        .unwrap();
    let analytics = AnalyticsCategory::new(spy.clone());

    let err = analytics
        .record_event_with_plugin(AnalyticsEvent::new("x"), "k")
        .unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::PluginNotFound {
            lookup: PluginLookupKind::Key(ref key)
        } if key == "k"
    ));
}

#[test]
fn concurrent_toggles_settle_on_last_write() {
    let (spy, _) = spy_with_memory();
    let analytics = Arc::new(AnalyticsCategory::new(spy));
    // Serializes each write with its log entry, so the log order is the write order.
    let writes = Arc::new(Mutex::new(Vec::new()));

    let writers: Vec<_> = (0..8)
        .map(|t| {
            let analytics = analytics.clone();
            let writes = writes.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let value = (i + t) % 2 == 0;
                    let mut log = writes.lock().unwrap();
                    if value {
                        analytics.enable();
                    } else {
                        analytics.disable();
                    }
                    log.push(value);
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let analytics = analytics.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let _ = analytics.is_enabled();
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let log = writes.lock().unwrap();
    assert_eq!(log.len(), 8 * 500);
    // Threads end on different values, so only the real last write explains the flag.
    assert!(log.contains(&true) && log.contains(&false));
    assert_eq!(analytics.is_enabled(), *log.last().unwrap());
    drop(log);

    analytics.disable();
    assert!(!analytics.is_enabled());
    analytics.enable();
    assert!(analytics.is_enabled());
}

#[test]
fn default_plugin_without_record_capability_is_an_error() {
    let spy = Arc::new(SpyLookup::default());
    spy.registry
        .register_plugin(Arc::new(StoragePlugin {
            descriptor: PluginDescriptor::new("k", "Bare analytics", Category::Analytics),
        }))
        .unwrap();
    let analytics = AnalyticsCategory::new(spy.clone());

    for result in [
        analytics.record("x"),
        analytics.record_event(AnalyticsEvent::new("x")),
    ] {
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::PluginNotFound {
                lookup: PluginLookupKind::CategoryDefault(Category::Analytics)
            }
        ));
        assert!(err.to_string().starts_with("a valid plugin is required"));
    }
    assert_eq!(spy.default_lookups(), 2);
    assert_eq!(spy.key_lookups(), 0);
}

#[test]
fn keyed_plugin_without_record_capability_is_an_error_for_names() {
    let spy = Arc::new(SpyLookup::default());
    spy.registry
        .register_plugin(Arc::new(StoragePlugin {
            descriptor: PluginDescriptor::new("k", "Bare analytics", Category::Analytics),
        }))
        .unwrap();
    let analytics = AnalyticsCategory::new(spy.clone());

    let err = analytics.record_with_plugin("x", "k").unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::PluginNotFound {
            lookup: PluginLookupKind::Key(ref key)
        } if key == "k"
    ));
    assert_eq!(spy.default_lookups(), 0);
}

#[test]
fn concurrent_records_are_independent() {
    let (spy, memory) = spy_with_memory();
    let analytics = Arc::new(AnalyticsCategory::new(spy));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let analytics = analytics.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    analytics.record(format!("event-{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(memory.len(), 200);
}

/// Blocks inside `record` until the test lets it continue
struct GatedPlugin {
    descriptor: PluginDescriptor,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    recorded: AtomicUsize,
}

impl CategoryPlugin for GatedPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl AnalyticsPlugin for GatedPlugin {
    fn record(&self, _event: AnalyticsEvent) -> nova_analytics::Result<()> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        self.recorded.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn toggle_does_not_affect_in_flight_call() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let plugin = Arc::new(GatedPlugin {
        descriptor: PluginDescriptor::new("gated", "Gated", Category::Analytics),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        recorded: AtomicUsize::new(0),
    });

    let registry = Arc::new(PluginRegistry::new());
    registry.register_analytics_plugin(plugin.clone()).unwrap();
    let analytics = Arc::new(AnalyticsCategory::new(registry));

    let in_flight = {
        let analytics = analytics.clone();
        thread::spawn(move || analytics.record("slow"))
    };

    entered_rx.recv().unwrap();
    // The flag lock must be free while the plugin runs.
    analytics.disable();
    release_tx.send(()).unwrap();

    in_flight.join().unwrap().unwrap();
    assert_eq!(plugin.recorded.load(Ordering::SeqCst), 1);

    // Later calls observe the new state.
    analytics.record("after").unwrap();
    assert_eq!(plugin.recorded.load(Ordering::SeqCst), 1);
}

/// Disables the dispatcher from inside its own record call
struct SelfDisablingPlugin {
    descriptor: PluginDescriptor,
    analytics: OnceLock<Arc<AnalyticsCategory>>,
    memory: MemoryAnalyticsPlugin,
}

impl CategoryPlugin for SelfDisablingPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl AnalyticsPlugin for SelfDisablingPlugin {
    fn record(&self, event: AnalyticsEvent) -> nova_analytics::Result<()> {
        if let Some(analytics) = self.analytics.get() {
            analytics.disable();
        }
        self.memory.record(event)
    }
}

#[test]
fn plugin_may_toggle_dispatcher_during_record() {
    let plugin = Arc::new(SelfDisablingPlugin {
        descriptor: PluginDescriptor::new("self", "Self disabling", Category::Analytics),
        analytics: OnceLock::new(),
        memory: MemoryAnalyticsPlugin::new("inner"),
    });

    let registry = Arc::new(PluginRegistry::new());
    registry.register_analytics_plugin(plugin.clone()).unwrap();
    let analytics = Arc::new(AnalyticsCategory::new(registry));
    assert!(plugin.analytics.set(analytics.clone()).is_ok());

    analytics.record("first").unwrap();
    analytics.record("second").unwrap();

    assert!(!analytics.is_enabled());
    assert_eq!(plugin.memory.len(), 1);
}
