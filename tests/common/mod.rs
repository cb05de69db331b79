//! Shared type fixture for the integration tests.

#![allow(dead_code)]

use sable::prelude::*;

/// ```text
/// Widget : IDrawable          Button : Widget          Label (sealed)
/// IDrawable, IClickable       List<T>                   Handler(Button) -> Widget
/// ```
pub struct Fixture {
    pub registry: TypeRegistry,
    pub widget: TypeHash,
    pub button: TypeHash,
    pub label: TypeHash,
    pub drawable: TypeHash,
    pub clickable: TypeHash,
    pub list: TypeHash,
    pub handler: TypeHash,
}

impl Fixture {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut registry = TypeRegistry::with_platform_types();
        let drawable = registry.register_type(InterfaceEntry::new("IDrawable")).unwrap();
        let clickable = registry.register_type(InterfaceEntry::new("IClickable")).unwrap();
        let widget = registry
            .register_type(ClassEntry::reference("Widget").with_interface(drawable))
            .unwrap();
        let button = registry
            .register_type(ClassEntry::reference("Button").with_base(widget))
            .unwrap();
        let label = registry
            .register_type(ClassEntry::reference("Label").sealed())
            .unwrap();

        let list = TypeHash::from_name("List");
        let t = registry
            .register_type(TypeParamEntry::for_owner("T", 0, list, "List"))
            .unwrap();
        registry
            .register_type(ClassEntry::reference("List").with_generic_param(t))
            .unwrap();

        let handler = registry
            .register_type(DelegateEntry::new(
                "Handler",
                vec![Param::new("sender", button)],
                widget,
            ))
            .unwrap();

        Self {
            registry,
            widget,
            button,
            label,
            drawable,
            clickable,
            list,
            handler,
        }
    }

    pub fn ctx(&self) -> CompilationContext<'_> {
        CompilationContext::new(&self.registry)
    }

    pub fn list_of(&self, element: TypeHash) -> TypeHash {
        self.registry.instance(self.list, &[element]).unwrap()
    }

    pub fn nullable(&self, ty: TypeHash) -> TypeHash {
        self.registry.nullable_of(ty).unwrap()
    }

    /// Register a free function returning `void`.
    pub fn function(&mut self, name: &str, params: Vec<Param>) -> TypeHash {
        self.registry
            .register_function(FunctionDef::new(name, params, primitives::VOID))
            .unwrap()
    }
}
