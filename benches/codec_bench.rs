use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cbf_codec::{decode, encode, CompositeType, Field, KeyValuePair, Location, Parameter, Type, Value};
use num_bigint::BigInt;

fn token_type() -> CompositeType {
    CompositeType {
        location: Location::Address {
            address: [0, 0, 0, 0, 0, 0, 0, 4].into(),
            name: "FungibleToken".to_owned(),
        },
        qualified_identifier: "FungibleToken.Vault".to_owned(),
        fields: Some(vec![
            Field::new("balance", Type::UFix64),
            Field::new("owner", Type::Optional(Some(Box::new(Type::Address)))),
        ]),
        initializers: Some(vec![Some(vec![Parameter::new(
            "initial",
            "balance",
            Type::UFix64,
        )])]),
    }
}

fn token_value(balance: u64) -> Value {
    Value::Struct {
        typ: token_type(),
        fields: Some(vec![
            Value::UFix64(balance),
            Value::Optional(Some(Box::new(Value::Address(
                [0, 0, 0, 0, 0, 0, 0, 9].into(),
            )))),
        ]),
    }
}

/// A wide array of composites under a dictionary, approximating an event
/// batch: the shape that dominates real payloads.
fn nested_value(width: u64) -> Value {
    Value::Dictionary {
        key_type: Type::String,
        value_type: Type::VariableSizedArray(Box::new(Type::AnyStruct)),
        pairs: (0..width)
            .map(|i| {
                KeyValuePair::new(
                    Value::String(format!("account-{}", i)),
                    Value::VariableArray {
                        element_type: Type::AnyStruct,
                        elements: vec![
                            token_value(i * 100_000_000),
                            Value::Int(BigInt::from(i) << 64),
                        ],
                    },
                )
            })
            .collect(),
    }
}

fn bench_encode(c: &mut Criterion) {
    let value = nested_value(64);
    c.bench_function("encode nested composites", |b| {
        b.iter(|| encode(black_box(&value)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let bytes = encode(&nested_value(64)).unwrap();
    c.bench_function("decode nested composites", |b| {
        b.iter(|| decode(None, black_box(&bytes)).unwrap())
    });
}

fn bench_roundtrip_scalar(c: &mut Criterion) {
    let value = Value::Int(BigInt::from(1) << 200);
    c.bench_function("roundtrip wide bigint", |b| {
        b.iter(|| {
            let bytes = encode(black_box(&value)).unwrap();
            decode(None, &bytes).unwrap()
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip_scalar);
criterion_main!(benches);
