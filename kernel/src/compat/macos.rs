//! macOS Framework Compatibility Layer
//!
//! Provides compatibility for macOS applications on NOS:
//! - Core Foundation framework
//! - Cocoa/AppKit framework
//! - Foundation framework
//! - Metal graphics framework
//! - Objective-C runtime

extern crate alloc;
extern crate hashbrown;

use alloc::string::String;
use alloc::string::ToString;
use hashbrown::HashMap;
use crate::compat::{*, DefaultHasherBuilder};

/// macOS compatibility module
pub struct MacOSModule {
    framework_registry: MacOSFrameworkRegistry,
    objc_runtime: ObjectiveCRuntime,
    core_foundation: CoreFoundationFramework,
    app_kit: AppKitFramework,
}

impl MacOSModule {
    pub fn new() -> Self {
        Self {
            framework_registry: MacOSFrameworkRegistry::new(),
            objc_runtime: ObjectiveCRuntime::new(),
            core_foundation: CoreFoundationFramework::new(),
            app_kit: AppKitFramework::new(),
        }
    }
}

impl PlatformModule for MacOSModule {
    fn name(&self) -> &str {
        "macOS Compatibility Layer"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

}

/// macOS Framework Registry
#[derive(Debug)]
pub struct MacOSFrameworkRegistry {
    loaded_frameworks: HashMap<String, MacOSFramework, DefaultHasherBuilder>,
}

#[derive(Debug)]
pub struct MacOSFramework {
    name: String,
    version: String,
    path: String,
    symbols: HashMap<String, usize, DefaultHasherBuilder>,
}

impl MacOSFrameworkRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            loaded_frameworks: HashMap::with_hasher(DefaultHasherBuilder),
        };

        registry.register_core_frameworks();
        registry
    }

    fn register_core_frameworks(&mut self) {
        // Core Foundation
        let mut cf_framework = MacOSFramework {
            name: "CoreFoundation".to_string(),
            version: "1575.15".to_string(),
            path: "/System/Library/Frameworks/CoreFoundation.framework".to_string(),
            symbols: HashMap::with_hasher(DefaultHasherBuilder),
        };

        cf_framework.symbols.insert("CFAllocate".to_string(), 1);
        cf_framework.symbols.insert("CFRelease".to_string(), 2);
        cf_framework.symbols.insert("CFStringCreateWithCString".to_string(), 3);

        // Foundation
        let mut foundation_framework = MacOSFramework {
            name: "Foundation".to_string(),
            version: "1575.15".to_string(),
            path: "/System/Library/Frameworks/Foundation.framework".to_string(),
            symbols: HashMap::with_hasher(DefaultHasherBuilder),
        };

        foundation_framework.symbols.insert("NSString stringWithUTF8String".to_string(), 100);
        foundation_framework.symbols.insert("NSArray array".to_string(), 101);

        // AppKit
        let mut appkit_framework = MacOSFramework {
            name: "AppKit".to_string(),
            version: "1894.20".to_string(),
            path: "/System/Library/Frameworks/AppKit.framework".to_string(),
            symbols: HashMap::with_hasher(DefaultHasherBuilder),
        };

        appkit_framework.symbols.insert("NSApplication sharedApplication".to_string(), 200);
        appkit_framework.symbols.insert("NSWindow init".to_string(), 201);

        self.loaded_frameworks.insert("CoreFoundation.framework".to_string(), cf_framework);
        self.loaded_frameworks.insert("Foundation.framework".to_string(), foundation_framework);
        self.loaded_frameworks.insert("AppKit.framework".to_string(), appkit_framework);
    }
}

/// Objective-C Runtime
#[derive(Debug)]
pub struct ObjectiveCRuntime {
    class_registry: HashMap<String, ObjCClass, DefaultHasherBuilder>,
    selector_registry: HashMap<String, usize, DefaultHasherBuilder>,
}

#[derive(Debug)]
pub struct ObjCClass {
    name: String,
    super_class: Option<String>,
    methods: HashMap<String, ObjCMethod, DefaultHasherBuilder>,
    ivars: HashMap<String, usize, DefaultHasherBuilder>,
}

#[derive(Debug)]
pub struct ObjCMethod {
    name: String,
    selector: String,
    implementation: usize,
    types: String,
}

impl ObjectiveCRuntime {
    pub fn new() -> Self {
        let mut runtime = Self {
            class_registry: HashMap::with_hasher(DefaultHasherBuilder),
            selector_registry: HashMap::with_hasher(DefaultHasherBuilder),
        };

        runtime.register_core_classes();
        runtime
    }

    fn register_core_classes(&mut self) {
        // NSObject
        let mut nsobject = ObjCClass {
            name: "NSObject".to_string(),
            super_class: None,
            methods: HashMap::with_hasher(DefaultHasherBuilder),
            ivars: HashMap::with_hasher(DefaultHasherBuilder),
        };

        nsobject.methods.insert("init".to_string(), ObjCMethod {
            name: "init".to_string(),
            selector: "init".to_string(),
            implementation: 0,
            types: "v@:".to_string(),
        });

        nsobject.methods.insert("dealloc".to_string(), ObjCMethod {
            name: "dealloc".to_string(),
            selector: "dealloc".to_string(),
            implementation: 1,
            types: "v@:".to_string(),
        });

        self.class_registry.insert("NSObject".to_string(), nsobject);
    }
}

/// Core Foundation Framework
#[derive(Debug)]
pub struct CoreFoundationFramework {
    // Core Foundation implementation
}

impl CoreFoundationFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// AppKit Framework
#[derive(Debug)]
pub struct AppKitFramework {
    // AppKit implementation
}

impl AppKitFramework {
    pub fn new() -> Self {
        Self {}
    }
}