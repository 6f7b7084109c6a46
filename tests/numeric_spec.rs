use bytekit::{Arena, Arg, BufferError, ByteSeq, Endian, ErrorKind, Number, NumericKind};

fn seq_of(bytes: &[u8]) -> ByteSeq {
    Arena::default().from_bytes(bytes).expect("from_bytes")
}

fn zeroed(len: usize) -> ByteSeq {
    Arena::default().allocate(len, true).expect("allocate")
}

fn kind(name: &str) -> NumericKind {
    name.parse().unwrap_or_else(|e| panic!("bad kind {}: {}", name, e))
}

#[test]
fn u32_big_and_little_endian() {
    let seq = zeroed(4);
    assert_eq!(seq.write_u32_be(0x12345678, 0).expect("write"), 4);
    assert_eq!(seq.to_vec(), vec![0x12, 0x34, 0x56, 0x78]);
    assert_eq!(seq.read_u32_be(0).expect("read"), 0x12345678);
    assert_eq!(seq.read_u32_le(0).expect("read"), 0x78563412);
}

#[test]
fn six_byte_signed_reads_sign_extend() {
    let seq = seq_of(&[0x12, 0x34, 0x56, 0x78, 0x90, 0xAB]);
    assert_eq!(seq.read_int_be(0, 6).expect("read"), 0x1234567890AB);
    assert_eq!(seq.read_int_le(0, 6).expect("read"), -0x546F87A9CBEE);
    assert_eq!(seq.read_uint_le(0, 6).expect("read"), 0xAB9078563412);
}

#[test]
fn variable_width_round_trips() {
    for width in 1..=6usize {
        let bits = 8 * width as u32;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        let samples = [min, min + 1, -1, 0, 1, max / 3, max - 1, max];
        for endian in [Endian::Big, Endian::Little] {
            for &value in &samples {
                let seq = zeroed(width + 2);
                let next = seq.write_int(value, 1, width, endian).expect("write");
                assert_eq!(next, 1 + width);
                let read = seq.read_int(1, width, endian).expect("read");
                assert_eq!(read, value, "width {} {:?} value {}", width, endian, value);
                assert_eq!(seq.get(0), Some(0), "write spilled before offset");
                assert_eq!(seq.get(width + 1), Some(0), "write spilled past field");
            }

            let umax = (1u64 << bits) - 1;
            for value in [0, 1, umax / 2, umax] {
                let seq = zeroed(width);
                seq.write_uint(value, 0, width, endian).expect("write");
                assert_eq!(seq.read_uint(0, width, endian).expect("read"), value);
            }
        }
    }
}

#[test]
fn variable_width_byte_order() {
    let seq = zeroed(3);
    seq.write_uint_be(0x010203, 0, 3).expect("write");
    assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    seq.write_uint_le(0x010203, 0, 3).expect("write");
    assert_eq!(seq.to_vec(), vec![3, 2, 1]);
    seq.write_int_be(-2, 0, 3).expect("write");
    assert_eq!(seq.to_vec(), vec![0xFF, 0xFF, 0xFE]);
    seq.write_int_le(-2, 0, 3).expect("write");
    assert_eq!(seq.to_vec(), vec![0xFE, 0xFF, 0xFF]);
}

#[test]
fn out_of_range_values_write_nothing() {
    let seq = seq_of(&[0x55; 6]);
    let cases: &[(i64, usize)] = &[(128, 1), (-129, 1), (1 << 15, 2), (-(1 << 47) - 1, 6), (1 << 47, 6)];
    for &(value, width) in cases {
        let err = seq.write_int_be(value, 0, width).unwrap_err();
        assert!(matches!(err, BufferError::OutOfRange { name: "value", .. }), "value {} width {}: {:?}", value, width, err);
    }
    for &(value, width) in &[(256u64, 1usize), (1 << 48, 6), (1 << 24, 3)] {
        let err = seq.write_uint_le(value, 0, width).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }
    assert_eq!(seq.to_vec(), vec![0x55; 6]);
}

#[test]
fn byte_length_must_be_one_to_six() {
    let seq = zeroed(8);
    for width in [0, 7, 8] {
        let err = seq.read_int_be(0, width).unwrap_err();
        assert!(matches!(err, BufferError::OutOfRange { name: "byteLength", .. }), "width {}: {:?}", width, err);
        assert_eq!(seq.write_uint_be(0, 0, width).unwrap_err().kind(), ErrorKind::OutOfRange);
    }
}

#[test]
fn accesses_past_the_end_fail_atomically() {
    let seq = zeroed(4);
    let err = seq.read_u32_be(1).unwrap_err();
    assert!(matches!(err, BufferError::OutOfRange { name: "offset", .. }), "got {:?}", err);
    assert_eq!(seq.write_u16_le(0xFFFF, 3).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.write_f64_be(1.0, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.write_uint_be(0xFFFFFF, 2, 3).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.read_u8(4).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.read_u8(usize::MAX).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.to_vec(), vec![0; 4]);
}

#[test]
fn fixed_width_signed_reads() {
    let seq = seq_of(&[0xFF, 0xFE, 0x80, 0x00, 0x00, 0x00]);
    assert_eq!(seq.read_i8(0).expect("read"), -1);
    assert_eq!(seq.read_u8(0).expect("read"), 0xFF);
    assert_eq!(seq.read_i16_be(0).expect("read"), -2);
    assert_eq!(seq.read_i16_le(0).expect("read"), -257);
    assert_eq!(seq.read_u16_le(1).expect("read"), 0x80FE);
    assert_eq!(seq.read_i32_be(2).expect("read"), i32::MIN);
    assert_eq!(seq.read_i32_le(2).expect("read"), 0x80);

    let out = zeroed(4);
    assert_eq!(out.write_i8(-1, 0).expect("write"), 1);
    assert_eq!(out.write_i16_le(-2, 1).expect("write"), 3);
    assert_eq!(out.to_vec(), vec![0xFF, 0xFE, 0xFF, 0x00]);
    out.write_i32_be(-1, 0).expect("write");
    assert_eq!(out.read_u32_le(0).expect("read"), u32::MAX);
}

#[test]
fn floats_round_trip() {
    let seq = zeroed(8);
    for value in [0.0, -1.5, std::f64::consts::PI, f64::MAX, f64::MIN_POSITIVE, 1e-310] {
        seq.write_f64_be(value, 0).expect("write");
        assert_eq!(seq.read_f64_be(0).expect("read"), value);
        seq.write_f64_le(value, 0).expect("write");
        assert_eq!(seq.read_f64_le(0).expect("read"), value);
    }

    seq.write_f32_le(1.1, 0).expect("write");
    assert_eq!(seq.read_f32_le(0).expect("read"), 1.1f32);
}

#[test]
fn non_finite_floats_use_canonical_patterns() {
    let cases: &[(f32, [u8; 4])] = &[
        (f32::NAN, [0x7F, 0xC0, 0x00, 0x00]),
        (f32::INFINITY, [0x7F, 0x80, 0x00, 0x00]),
        (f32::NEG_INFINITY, [0xFF, 0x80, 0x00, 0x00]),
        (0.0, [0x00, 0x00, 0x00, 0x00]),
        (-0.0, [0x80, 0x00, 0x00, 0x00]),
    ];
    let seq = zeroed(4);
    for (value, bytes) in cases {
        seq.write_f32_be(*value, 0).expect("write");
        assert_eq!(seq.to_vec(), bytes.to_vec(), "pattern for {}", value);
    }

    let wide = zeroed(8);
    wide.write_f64_le(f64::NAN, 0).expect("write");
    assert_eq!(wide.to_vec(), vec![0, 0, 0, 0, 0, 0, 0xF8, 0x7F]);
    wide.write_f64_be(f64::NEG_INFINITY, 0).expect("write");
    assert_eq!(wide.to_vec(), vec![0xFF, 0xF0, 0, 0, 0, 0, 0, 0]);
    assert!(wide.read_f64_be(0).expect("read").is_infinite());
}

#[test]
fn dynamic_writes_reject_non_finite_integers() {
    let seq = zeroed(8);
    let int_kinds = ["writeUInt32BE", "writeInt16LE", "writeUInt8", "writeIntBE"];
    for name in int_kinds {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5] {
            let err = seq
                .write_number(kind(name), &Arg::Number(value), &Arg::Number(0.0), &Arg::Number(3.0))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "{} with {}", name, value);
        }
    }
    for name in ["writeFloatBE", "writeDoubleLE"] {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0] {
            seq.write_number(kind(name), &Arg::Number(value), &Arg::Number(0.0), &Arg::Undefined)
                .unwrap_or_else(|e| panic!("{} with {} failed: {}", name, value, e));
        }
    }
    let value = seq
        .read_number(kind("readDoubleLE"), &Arg::Number(0.0), &Arg::Undefined)
        .expect("read");
    assert!(matches!(value, Number::Float(f) if f == 0.0 && f.is_sign_negative()), "got {:?}", value);
}

#[test]
fn dynamic_float32_rounds_to_single_precision() {
    let seq = zeroed(4);
    seq.write_number(kind("Float32LE"), &Arg::Number(0.1), &Arg::Undefined, &Arg::Undefined)
        .expect("write");
    let value = seq.read_number(kind("Float32LE"), &Arg::Undefined, &Arg::Undefined).expect("read");
    assert_eq!(value, Number::Float(0.1f32 as f64));
    assert_ne!(value, Number::Float(0.1));
}

#[test]
fn dynamic_integer_accessors() {
    let seq = seq_of(&[0x12, 0x34, 0x56, 0x78, 0x90, 0xAB]);
    let value = seq
        .read_number(kind("readIntLE"), &Arg::Number(0.0), &Arg::Number(6.0))
        .expect("read");
    assert_eq!(value, Number::Int(-0x546F87A9CBEE));
    let value = seq
        .read_number(kind("readUInt16BE"), &Arg::Number(4.0), &Arg::Undefined)
        .expect("read");
    assert_eq!(value, Number::Int(0x90AB));

    let err = seq
        .read_number(kind("readIntLE"), &Arg::Number(0.0), &Arg::Number(7.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let err = seq
        .read_number(kind("readUIntBE"), &Arg::Number(0.0), &Arg::Undefined)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);

    let next = seq
        .write_number(kind("writeUInt16LE"), &Arg::Number(0xBEEF as f64), &Arg::Number(2.0), &Arg::Undefined)
        .expect("write");
    assert_eq!(next, 4);
    assert_eq!(seq.to_vec(), vec![0x12, 0x34, 0xEF, 0xBE, 0x90, 0xAB]);

    seq.write_number(kind("writeUInt8"), &Arg::Bool(true), &Arg::Number(0.0), &Arg::Undefined)
        .expect("write");
    assert_eq!(seq.get(0), Some(1));
}

#[test]
fn dynamic_value_is_checked_before_offset_bounds() {
    let seq = zeroed(4);
    let err = seq
        .write_number(kind("writeUInt8"), &Arg::Number(256.0), &Arg::Number(10.0), &Arg::Undefined)
        .unwrap_err();
    assert!(matches!(err, BufferError::OutOfRange { name: "value", .. }), "got {:?}", err);

    let err = seq
        .write_number(kind("writeUInt8"), &Arg::Number(255.0), &Arg::Number(10.0), &Arg::Undefined)
        .unwrap_err();
    assert!(matches!(err, BufferError::OutOfRange { name: "offset", .. }), "got {:?}", err);
}

#[test]
fn dynamic_offsets_must_be_non_negative_integers() {
    let seq = zeroed(8);
    for offset in [Arg::Number(-1.0), Arg::Number(1.5), Arg::Number(f64::NAN), Arg::Str("0"), Arg::Bool(false)] {
        let err = seq.read_number(kind("readUInt8"), &offset, &Arg::Undefined).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType, "offset {:?}", offset);
    }
    assert_eq!(
        seq.read_number(kind("readUInt8"), &Arg::Undefined, &Arg::Undefined).expect("default offset"),
        Number::Int(0)
    );
}

#[test]
fn sixty_four_bit_accessors() {
    let seq = zeroed(8);
    seq.write_big_u64_be(u64::MAX, 0).expect("write");
    assert_eq!(seq.to_vec(), vec![0xFF; 8]);
    assert_eq!(seq.read_big_i64_be(0).expect("read"), -1);

    seq.write_big_i64_le(i64::MIN, 0).expect("write");
    assert_eq!(seq.to_vec(), vec![0, 0, 0, 0, 0, 0, 0, 0x80]);
    assert_eq!(seq.read_big_u64_le(0).expect("read"), 1 << 63);
    assert_eq!(seq.read_big_i64_be(0).expect("read"), 0x80);
}

#[test]
fn dynamic_sixty_four_bit_writes_require_bigint() {
    let seq = zeroed(8);
    let err = seq
        .write_number(kind("writeBigInt64BE"), &Arg::Number(1.0), &Arg::Undefined, &Arg::Undefined)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);

    let err = seq
        .write_number(kind("writeBigInt64BE"), &Arg::BigInt(1 << 63), &Arg::Undefined, &Arg::Undefined)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    let err = seq
        .write_number(kind("writeBigUInt64LE"), &Arg::BigInt(-1), &Arg::Undefined, &Arg::Undefined)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(seq.to_vec(), vec![0; 8]);

    seq.write_number(kind("writeBigUInt64LE"), &Arg::BigInt(u64::MAX as i128), &Arg::Undefined, &Arg::Undefined)
        .expect("write");
    let value = seq.read_number(kind("readBigUInt64LE"), &Arg::Undefined, &Arg::Undefined).expect("read");
    assert_eq!(value, Number::BigInt(u64::MAX as i128));
    let value = seq.read_number(kind("readBigInt64LE"), &Arg::Undefined, &Arg::Undefined).expect("read");
    assert_eq!(value, Number::BigInt(-1));
}

#[test]
fn numeric_kind_names() {
    assert_eq!(kind("readUInt32BE"), NumericKind::Int { signed: false, width: Some(4), endian: Endian::Big });
    assert_eq!(kind("writeInt16LE"), NumericKind::Int { signed: true, width: Some(2), endian: Endian::Little });
    assert_eq!(kind("UIntBE"), NumericKind::Int { signed: false, width: None, endian: Endian::Big });
    assert_eq!(kind("readUint8"), NumericKind::Int { signed: false, width: Some(1), endian: Endian::Big });
    assert_eq!(kind("writeDoubleLE"), NumericKind::Float64(Endian::Little));
    assert_eq!(kind("readFloatBE"), NumericKind::Float32(Endian::Big));
    assert_eq!(kind("BigUInt64LE"), NumericKind::BigUInt64(Endian::Little));

    for bad in ["Int128BE", "readDouble", "UInt32", "", "readFoo"] {
        let err = bad.parse::<NumericKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType, "{:?}", bad);
    }
}

#[test]
fn writes_through_views_hit_the_shared_store() {
    let seq = zeroed(8);
    let view = seq.slice(4, 8);
    view.write_u32_be(0xCAFEBABE, 0).expect("write");
    assert_eq!(seq.read_u32_be(4).expect("read"), 0xCAFEBABE);
    assert_eq!(view.write_u16_be(1, 3).unwrap_err().kind(), ErrorKind::OutOfRange);
}
