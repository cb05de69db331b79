//! A small type world shared by the unit tests.
//!
//! ```text
//! Shape : IShape                  Circle : Shape        Square : Shape (sealed)
//! Token (sealed)                  Meters : IMeasurable  (struct, operators to/from double)
//! Color (enum)                    Flags8 (enum : uint8)
//! IEnumerable<out T>              List<T> : IEnumerable<T>
//! delegate void Sink<in T>(T)     ShapeHandler(Circle) -> Shape
//! IntHandler(int) -> Shape        Constrained<T : Shape>
//! ```
//!
//! Set `RUST_LOG=sable_compiler=trace` to see resolution logs in test output.

use sable_core::{
    ClassEntry, DelegateEntry, EnumEntry, FunctionDef, InterfaceEntry, Param, PrimitiveKind,
    TypeHash, TypeParamEntry, TypeQuery, Variance, primitives,
};
use sable_registry::TypeRegistry;
use tracing_subscriber::EnvFilter;

use crate::{CompilationContext, CompilerOptions};

pub(crate) struct World {
    pub registry: TypeRegistry,
    pub shape: TypeHash,
    pub circle: TypeHash,
    pub square: TypeHash,
    pub token: TypeHash,
    pub ishape: TypeHash,
    pub imeasurable: TypeHash,
    pub meters: TypeHash,
    pub meters_to_double: TypeHash,
    pub double_to_meters: TypeHash,
    pub color: TypeHash,
    pub small_enum: TypeHash,
    pub shape_param: TypeHash,
    pub enumerable: TypeHash,
    pub list_def: TypeHash,
    pub sink_def: TypeHash,
    pub shape_handler: TypeHash,
    pub int_handler: TypeHash,
    pub describe_shape: TypeHash,
    pub describe_int: TypeHash,
    pub describe_long: TypeHash,
}

impl World {
    pub fn new() -> Self {
        init_tracing();
        let mut r = TypeRegistry::with_platform_types();

        let ishape = r.register_type(InterfaceEntry::new("IShape")).unwrap();
        let imeasurable = r.register_type(InterfaceEntry::new("IMeasurable")).unwrap();
        let shape = r
            .register_type(ClassEntry::reference("Shape").with_interface(ishape))
            .unwrap();
        let circle = r
            .register_type(ClassEntry::reference("Circle").with_base(shape))
            .unwrap();
        let square = r
            .register_type(ClassEntry::reference("Square").with_base(shape).sealed())
            .unwrap();
        let token = r.register_type(ClassEntry::reference("Token").sealed()).unwrap();

        let meters = r
            .register_type(ClassEntry::value("Meters").with_interface(imeasurable))
            .unwrap();
        let meters_to_double = r
            .register_conversion_operator(FunctionDef::conversion_operator(
                meters,
                false,
                meters,
                primitives::DOUBLE,
            ))
            .unwrap();
        let double_to_meters = r
            .register_conversion_operator(FunctionDef::conversion_operator(
                meters,
                true,
                primitives::DOUBLE,
                meters,
            ))
            .unwrap();

        let color = r
            .register_type(
                EnumEntry::new("Color")
                    .with_value("Red", 0)
                    .with_value("Green", 1)
                    .with_value("Blue", 2),
            )
            .unwrap();
        let small_enum = r
            .register_type(EnumEntry::new("Flags8").with_underlying(PrimitiveKind::Uint8))
            .unwrap();

        let constrained = TypeHash::from_name("Constrained");
        let shape_param = r
            .register_type(
                TypeParamEntry::for_owner("T", 0, constrained, "Constrained").with_base(shape),
            )
            .unwrap();

        let enumerable = TypeHash::from_name("IEnumerable");
        let et = r
            .register_type(TypeParamEntry::for_owner("T", 0, enumerable, "IEnumerable"))
            .unwrap();
        r.register_type(
            InterfaceEntry::new("IEnumerable").with_generic_param(et, Variance::Covariant),
        )
        .unwrap();

        let list_def = TypeHash::from_name("List");
        let lt = r
            .register_type(TypeParamEntry::for_owner("T", 0, list_def, "List"))
            .unwrap();
        let enumerable_of_lt = r.instance(enumerable, &[lt]).unwrap();
        r.register_type(
            ClassEntry::reference("List")
                .with_generic_param(lt)
                .with_interface(enumerable_of_lt),
        )
        .unwrap();

        let sink_def = TypeHash::from_name("Sink");
        let st = r
            .register_type(TypeParamEntry::for_owner("T", 0, sink_def, "Sink"))
            .unwrap();
        r.register_type(
            DelegateEntry::new("Sink", vec![Param::new("value", st)], primitives::VOID)
                .with_generic_param(st, Variance::Contravariant),
        )
        .unwrap();

        let shape_handler = r
            .register_type(DelegateEntry::new(
                "ShapeHandler",
                vec![Param::new("circle", circle)],
                shape,
            ))
            .unwrap();
        let int_handler = r
            .register_type(DelegateEntry::new(
                "IntHandler",
                vec![Param::new("value", primitives::INT32)],
                shape,
            ))
            .unwrap();

        let describe_shape = r
            .register_function(FunctionDef::new("Describe", vec![Param::new("s", shape)], circle))
            .unwrap();
        let describe_int = r
            .register_function(FunctionDef::new(
                "Describe",
                vec![Param::new("x", primitives::INT32)],
                primitives::INT32,
            ))
            .unwrap();
        let describe_long = r
            .register_function(FunctionDef::new(
                "DescribeLong",
                vec![Param::new("x", primitives::INT64)],
                shape,
            ))
            .unwrap();

        Self {
            registry: r,
            shape,
            circle,
            square,
            token,
            ishape,
            imeasurable,
            meters,
            meters_to_double,
            double_to_meters,
            color,
            small_enum,
            shape_param,
            enumerable,
            list_def,
            sink_def,
            shape_handler,
            int_handler,
            describe_shape,
            describe_int,
            describe_long,
        }
    }

    pub fn ctx(&self) -> CompilationContext<'_> {
        CompilationContext::new(&self.registry)
    }

    pub fn unsafe_ctx(&self) -> CompilationContext<'_> {
        self.ctx_with(|o| o.with_unsafe_context(true))
    }

    pub fn ctx_with(
        &self,
        f: impl FnOnce(CompilerOptions) -> CompilerOptions,
    ) -> CompilationContext<'_> {
        CompilationContext::with_options(&self.registry, f(CompilerOptions::default()))
    }

    /// Register a free function returning `void`.
    pub fn function(&mut self, name: &str, params: Vec<Param>) -> TypeHash {
        self.registry
            .register_function(FunctionDef::new(name, params, primitives::VOID))
            .unwrap()
    }

    /// Register an arbitrary function.
    pub fn register(&mut self, def: FunctionDef) -> TypeHash {
        self.registry.register_function(def).unwrap()
    }

    /// Register a method-level type parameter `name` owned by function `owner`.
    pub fn method_param(&mut self, owner: &str, name: &str, index: usize) -> TypeHash {
        let owner_hash = TypeHash::from_name(owner);
        self.registry
            .register_type(TypeParamEntry::for_owner(name, index, owner_hash, owner))
            .unwrap()
    }

    pub fn nullable(&self, ty: TypeHash) -> TypeHash {
        self.registry.nullable_of(ty).unwrap()
    }

    /// `IEnumerable<ty>`
    pub fn seq(&self, ty: TypeHash) -> TypeHash {
        self.registry.instance(self.enumerable, &[ty]).unwrap()
    }

    /// `List<ty>`
    pub fn list(&self, ty: TypeHash) -> TypeHash {
        self.registry.instance(self.list_def, &[ty]).unwrap()
    }

    /// `Sink<ty>`
    pub fn sink(&self, ty: TypeHash) -> TypeHash {
        self.registry.instance(self.sink_def, &[ty]).unwrap()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
