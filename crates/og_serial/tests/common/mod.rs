#![allow(dead_code, reason = "shared by several test binaries")]

use og_serial::registry::TypeRegistry;
use og_serial::{
    Composite, Declared, FieldInfo, FormatType, Graph, Object, ObjectId, Serializer, TypeInfo, Value,
};

pub static WHEEL: TypeInfo = TypeInfo::new(
    "demo::parts::Wheel",
    &[
        FieldInfo::new("size", Declared::INT),
        FieldInfo::new("replaceable", Declared::BOOL),
    ],
);

pub static CAR: TypeInfo = TypeInfo::new(
    "demo::vehicles::Car",
    &[
        FieldInfo::new("seats", Declared::INT),
        FieldInfo::new("wheels", Declared::Sequence(&Declared::Exact(&WHEEL))),
    ],
);

pub static TRUCK: TypeInfo = TypeInfo::new(
    "demo::vehicles::Truck",
    &[FieldInfo::new("load", Declared::FLOAT)],
);

/// Never registered.
pub static BICYCLE: TypeInfo = TypeInfo::new(
    "demo::vehicles::Bicycle",
    &[FieldInfo::new("gears", Declared::INT)],
);

pub static PERSON: TypeInfo = TypeInfo::new(
    "demo::Person",
    &[
        FieldInfo::new("name", Declared::TEXT),
        FieldInfo::new("born", Declared::DATE),
        FieldInfo::new("friend", Declared::Exact(&PERSON)),
        FieldInfo::new("vehicle", VEHICLE),
        FieldInfo::new("extra", Declared::Any),
    ],
);

pub const VEHICLE: Declared = Declared::Abstract("Vehicle");
pub static WHEELS: Declared = Declared::Sequence(&Declared::Exact(&WHEEL));
pub static VEHICLES: Declared = Declared::Sequence(&VEHICLE);
pub static GARAGE: Declared = Declared::Collection(&VEHICLE);
pub static PARKING: Declared = Declared::Map(&VEHICLE);
pub static PEOPLE: Declared = Declared::Sequence(&Declared::Exact(&PERSON));

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register("car", &CAR).unwrap();
    registry.register("truck", &TRUCK).unwrap();
    registry
}

pub fn json() -> Serializer {
    Serializer::create(FormatType::Json, Some(registry()), true)
}

pub fn ron() -> Serializer {
    Serializer::create(FormatType::Ron, Some(registry()), true)
}

pub fn wheel(graph: &mut Graph, size: i64) -> ObjectId {
    graph.insert(
        Composite::new(&WHEEL)
            .with("size", size)
            .with("replaceable", true),
    )
}

pub fn car(graph: &mut Graph, seats: i64) -> ObjectId {
    let wheels: Vec<Value> = (0..4).map(|_| wheel(graph, 17).into()).collect();
    let wheels = graph.insert(Object::Sequence(wheels));
    graph.insert(
        Composite::new(&CAR)
            .with("seats", seats)
            .with("wheels", wheels),
    )
}

pub fn truck(graph: &mut Graph, load: f64) -> ObjectId {
    graph.insert(Composite::new(&TRUCK).with("load", load))
}

pub fn bicycle(graph: &mut Graph) -> ObjectId {
    graph.insert(Composite::new(&BICYCLE).with("gears", 21))
}

pub fn text(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap()
}
