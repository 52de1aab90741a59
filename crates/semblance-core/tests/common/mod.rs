//! Shared fixture schema and helpers for the integration suites.
//!
//! The fixture registry declares one enum (`demo.Mode`), a small nested
//! message (`demo.Probe`), a wide message exercising every field shape
//! (`demo.Frame`), an unrelated type with overlapping field names
//! (`demo.Gauge`), and two extensions against `demo.Frame`. A hand-written
//! generated-style `GeneratedProbe` struct implements `Reflect` over the same
//! `demo.Probe` schema the dynamic representation uses.

use std::sync::{Arc, OnceLock};

use semblance_core::{equal, RuleSet};
use semblance_reflect::{
    Cardinality, DescriptorRegistry, DynamicMessage, EnumDescriptor, FieldDescriptor, FieldType,
    MapKeyKind, MessageDescriptor, OneofDescriptor, Reflect, ScalarKind, ScalarValue, Value,
};

/// All fixture descriptors, plus the registry they are registered in.
#[allow(dead_code)]
pub struct Fixtures {
    pub registry: DescriptorRegistry,
    pub mode: Arc<EnumDescriptor>,
    /// An enum type no fixture field uses; handy for irrelevant-rule tests.
    pub grade: Arc<EnumDescriptor>,
    pub probe: Arc<MessageDescriptor>,
    pub frame: Arc<MessageDescriptor>,
    pub gauge: Arc<MessageDescriptor>,
    pub ext_note: Arc<FieldDescriptor>,
    pub ext_bias: Arc<FieldDescriptor>,
}

fn probe_descriptor() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "demo.Probe",
        vec![
            FieldDescriptor::new(
                1,
                "reading",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Int32),
            ),
            FieldDescriptor::new(
                2,
                "unit",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::String),
            ),
            FieldDescriptor::new(
                3,
                "calibrated",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Bool),
            ),
        ],
        vec![],
    )
    .expect("fixture probe descriptor")
}

pub fn fixtures() -> Fixtures {
    let mode = EnumDescriptor::new(
        "demo.Mode",
        &[("MODE_OFF", 0), ("MODE_LOW", 1), ("MODE_HIGH", 2)],
    );
    let grade = EnumDescriptor::new("demo.Grade", &[("GRADE_UNSET", 0), ("GRADE_A", 1)]);
    let probe = probe_descriptor();

    let frame = MessageDescriptor::new(
        "demo.Frame",
        vec![
            FieldDescriptor::new(
                1,
                "count",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Int32),
            ),
            FieldDescriptor::new(
                2,
                "total",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Int64),
            ),
            FieldDescriptor::new(
                3,
                "mask",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Uint32),
            ),
            FieldDescriptor::new(
                4,
                "ticks",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Uint64),
            ),
            FieldDescriptor::new(
                5,
                "ratio",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Float),
            ),
            FieldDescriptor::new(
                6,
                "enabled",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Bool),
            ),
            FieldDescriptor::new(
                7,
                "label",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::String),
            ),
            FieldDescriptor::new(
                8,
                "payload",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Bytes),
            ),
            FieldDescriptor::new(9, "mode", Cardinality::Singular, FieldType::Enum(mode.clone())),
            FieldDescriptor::new(
                10,
                "probe",
                Cardinality::Singular,
                FieldType::Message(probe.clone()),
            ),
            FieldDescriptor::new(
                11,
                "probes",
                Cardinality::Repeated,
                FieldType::Message(probe.clone()),
            ),
            FieldDescriptor::new(
                12,
                "probe_index",
                Cardinality::Map(MapKeyKind::String),
                FieldType::Message(probe.clone()),
            ),
            FieldDescriptor::new(
                13,
                "modes",
                Cardinality::Repeated,
                FieldType::Enum(mode.clone()),
            ),
            FieldDescriptor::new(
                14,
                "mode_index",
                Cardinality::Map(MapKeyKind::String),
                FieldType::Enum(mode.clone()),
            ),
            FieldDescriptor::new(
                15,
                "choice_num",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Uint32),
            )
            .with_oneof("choice"),
            FieldDescriptor::new(
                16,
                "choice_str",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::String),
            )
            .with_oneof("choice"),
            FieldDescriptor::new(
                17,
                "bias",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Int32),
            )
            .with_default(ScalarValue::I32(81)),
            FieldDescriptor::new(
                18,
                "span",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Uint32),
            )
            .with_default(ScalarValue::U32(83)),
            FieldDescriptor::new(
                19,
                "gain",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Float),
            )
            .with_default(ScalarValue::F32(91.5)),
            FieldDescriptor::new(
                20,
                "armed",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Bool),
            )
            .with_default(ScalarValue::Bool(true)),
            FieldDescriptor::new(
                21,
                "seed",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Bytes),
            )
            .with_default(ScalarValue::Bytes(b"world".to_vec())),
            FieldDescriptor::new(
                22,
                "offset",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Int64),
            )
            .with_default(ScalarValue::I64(82)),
            FieldDescriptor::new(
                23,
                "stride",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Uint64),
            )
            .with_default(ScalarValue::U64(84)),
            FieldDescriptor::new(
                24,
                "scale",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::Double),
            )
            .with_default(ScalarValue::F64(92e3)),
            FieldDescriptor::new(
                25,
                "greeting",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::String),
            )
            .with_default(ScalarValue::Str("hello".to_string())),
            FieldDescriptor::new(
                26,
                "fallback",
                Cardinality::Singular,
                FieldType::Enum(mode.clone()),
            )
            .with_default(ScalarValue::I32(1)),
        ],
        vec![OneofDescriptor::new("choice", &["choice_num", "choice_str"])],
    )
    .expect("fixture frame descriptor");

    let gauge = MessageDescriptor::new(
        "demo.Gauge",
        vec![
            FieldDescriptor::new(
                1,
                "label",
                Cardinality::Singular,
                FieldType::Scalar(ScalarKind::String),
            ),
            FieldDescriptor::new(
                2,
                "probe",
                Cardinality::Singular,
                FieldType::Message(probe.clone()),
            ),
        ],
        vec![],
    )
    .expect("fixture gauge descriptor");

    let ext_note = FieldDescriptor::extension(
        100,
        "demo.ext_note",
        "demo.Frame",
        Cardinality::Singular,
        FieldType::Scalar(ScalarKind::String),
    );
    let ext_bias = FieldDescriptor::extension_with_default(
        &FieldDescriptor::extension(
            101,
            "demo.ext_bias",
            "demo.Frame",
            Cardinality::Singular,
            FieldType::Scalar(ScalarKind::Int32),
        ),
        ScalarValue::I32(81),
    );

    let mut registry = DescriptorRegistry::new();
    registry
        .register_message(probe.clone())
        .expect("register probe");
    registry
        .register_message(frame.clone())
        .expect("register frame");
    registry
        .register_message(gauge.clone())
        .expect("register gauge");
    registry
        .register_extension(ext_note.clone())
        .expect("register ext_note");
    registry
        .register_extension(ext_bias.clone())
        .expect("register ext_bias");

    Fixtures {
        registry,
        mode,
        grade,
        probe,
        frame,
        gauge,
        ext_note,
        ext_bias,
    }
}

/// Compare two messages under a rule set.
#[allow(dead_code)]
pub fn eq(x: &DynamicMessage, y: &DynamicMessage, rules: &RuleSet) -> bool {
    equal(&Value::message(x), &Value::message(y), rules)
}

/// A fresh, all-unset frame.
#[allow(dead_code)]
pub fn frame(fx: &Fixtures) -> DynamicMessage {
    DynamicMessage::new(fx.frame.clone())
}

/// A fresh, all-unset probe.
#[allow(dead_code)]
pub fn empty_probe(fx: &Fixtures) -> DynamicMessage {
    DynamicMessage::new(fx.probe.clone())
}

/// A probe with only `reading` set.
#[allow(dead_code)]
pub fn probe_with_reading(fx: &Fixtures, reading: i32) -> DynamicMessage {
    DynamicMessage::new(fx.probe.clone())
        .with_field("reading", reading.into())
        .expect("set probe reading")
}

/// A hand-written generated-style representation of `demo.Probe`.
///
/// This is the shape a code generator would emit: plain optional struct
/// fields plus a `Reflect` implementation over a shared static descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct GeneratedProbe {
    pub reading: Option<i32>,
    pub unit: Option<String>,
    pub calibrated: Option<bool>,
}

static GENERATED_PROBE_DESC: OnceLock<Arc<MessageDescriptor>> = OnceLock::new();

impl GeneratedProbe {
    fn shared_descriptor() -> &'static Arc<MessageDescriptor> {
        GENERATED_PROBE_DESC.get_or_init(probe_descriptor)
    }
}

impl Reflect for GeneratedProbe {
    fn descriptor(&self) -> &Arc<MessageDescriptor> {
        Self::shared_descriptor()
    }

    fn populated_fields(&self) -> Vec<Arc<FieldDescriptor>> {
        self.descriptor()
            .fields()
            .iter()
            .filter(|field| match field.number() {
                1 => self.reading.is_some(),
                2 => self.unit.is_some(),
                3 => self.calibrated.is_some(),
                _ => false,
            })
            .cloned()
            .collect()
    }

    fn get(&self, field: &FieldDescriptor) -> Option<Value<'_>> {
        match field.number() {
            1 => self.reading.map(|v| Value::Scalar(v.into())),
            2 => self
                .unit
                .as_ref()
                .map(|v| Value::Scalar(ScalarValue::Str(v.clone()))),
            3 => self.calibrated.map(|v| Value::Scalar(v.into())),
            _ => None,
        }
    }

    fn unknown_bytes(&self) -> &[u8] {
        &[]
    }

    fn extensions(&self) -> Vec<(Arc<FieldDescriptor>, Value<'_>)> {
        Vec::new()
    }
}
