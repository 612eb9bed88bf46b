use std::fs;

use colfer::{Error, Field, Package, Struct, StructRef, Type, generate};

fn field(name: &str, index: u8, kind: Type) -> Field {
    Field {
        name: name.to_string(),
        index,
        kind,
        type_native: String::new(),
    }
}

/// Two packages with a cross-package reference and an array field.
fn course_schema() -> Vec<Package> {
    vec![
        Package {
            name: "demo/api".to_string(),
            name_native: String::new(),
            structs: vec![
                Struct {
                    name: "Course".to_string(),
                    fields: vec![
                        field("Open", 0, Type::Bool),
                        field("Seats", 1, Type::Uint32),
                        field("Title", 2, Type::Text),
                        field(
                            "Meta",
                            3,
                            Type::Ref {
                                to: StructRef { pkg: 1, index: 0 },
                                array: false,
                            },
                        ),
                        field(
                            "Lessons",
                            4,
                            Type::Ref {
                                to: StructRef { pkg: 0, index: 1 },
                                array: true,
                            },
                        ),
                    ],
                },
                Struct {
                    name: "Lesson".to_string(),
                    fields: vec![
                        field("Since", 0, Type::Timestamp),
                        field("Summary", 1, Type::Binary),
                    ],
                },
            ],
        },
        Package {
            name: "common".to_string(),
            name_native: String::new(),
            structs: vec![Struct {
                name: "Meta".to_string(),
                fields: vec![field("Tag", 0, Type::Int32)],
            }],
        },
    ]
}

const GOLDEN_API: &str = r#"package api

// This file was generated by colf(1); DO NOT EDIT

import (
	"fmt"
	"io"
	"math"
	"time"
)

// Reference imports to suppress errors if they are not otherwise used.
var _ = math.E
var _ = time.RFC3339

// ColferContinue signals a data continuation as a byte index.
type ColferContinue int

func (i ColferContinue) Error() string {
	return fmt.Sprintf("colfer: data continuation at byte %d", i)
}

// ColferError signals a data mismatch as as a byte index.
type ColferError int

func (i ColferError) Error() string {
	return fmt.Sprintf("colfer: unknown header at byte %d", i)
}

type Course struct {
	Open	bool
	Seats	uint32
	Title	string
	Meta	*common.Meta
	Lessons	[]*Lesson
}

// MarshalTo encodes o as Colfer into buf and returns the number of bytes written.
// If the buffer is too small, MarshalTo will panic.
func (o *Course) MarshalTo(buf []byte) int {
	if o == nil {
		return 0
	}

	var i int

	if o.Open {
		buf[i] = 0
		i++
	}

	if x := o.Seats; x != 0 {
		buf[i] = 1
		i++
		for x >= 0x80 {
			buf[i] = byte(x | 0x80)
			x >>= 7
			i++
		}
		buf[i] = byte(x)
		i++
	}

	if v := o.Title; len(v) != 0 {
		buf[i] = 2
		i++
		x := uint(len(v))
		for x >= 0x80 {
			buf[i] = byte(x | 0x80)
			x >>= 7
			i++
		}
		buf[i] = byte(x)
		i++
		copy(buf[i:], v)
		i += len(v)
	}

	if v := o.Meta; v != nil {
		buf[i] = 3
		i++
		i += v.MarshalTo(buf[i:])
	}

	if l := len(o.Lessons); l != 0 {
		buf[i] = 4
		i++
		x := uint(l)
		for x >= 0x80 {
			buf[i] = byte(x | 0x80)
			x >>= 7
			i++
		}
		buf[i] = byte(x)
		i++
		for _, v := range o.Lessons {
			i += v.MarshalTo(buf[i:])
		}
	}

	buf[i] = 0x7f
	i++
	return i
}

// MarshalLen returns the Colfer serial byte size.
func (o *Course) MarshalLen() int {
	if o == nil {
		return 0
	}

	l := 1

	if o.Open {
		l++
	}

	if x := o.Seats; x != 0 {
		for x >= 0x80 {
			x >>= 7
			l++
		}
		l += 2
	}

	if x := len(o.Title); x != 0 {
		l += x
		for x >= 0x80 {
			x >>= 7
			l++
		}
		l += 2
	}

	if v := o.Meta; v != nil {
		l += v.MarshalLen() + 1
	}

	if x := len(o.Lessons); x != 0 {
		for x >= 0x80 {
			x >>= 7
			l++
		}
		l += 2
		for _, v := range o.Lessons {
			l += v.MarshalLen()
		}
	}

	return l
}

// MarshalBinary encodes o as Colfer conform encoding.BinaryMarshaler.
// The error return is always nil.
func (o *Course) MarshalBinary() (data []byte, err error) {
	data = make([]byte, o.MarshalLen())
	o.MarshalTo(data)
	return data, nil
}

// UnmarshalBinary decodes data as Colfer conform encoding.BinaryUnmarshaler.
// The error return options are io.EOF, demo/api.ColferError, and demo/api.ColferContinue.
func (o *Course) UnmarshalBinary(data []byte) error {
	if len(data) == 0 {
		return io.EOF
	}

	header := data[0]
	i := 1

	if header == 0 {
		o.Open = true

		if i == len(data) {
			return io.EOF
		}
		header = data[i]
		i++
	}

	if header == 1 {
		var x uint32
		for shift := uint(0); ; shift += 7 {
			if i == len(data) {
				return io.EOF
			}
			b := data[i]
			i++
			if shift == 28 {
				x |= uint32(b) << 28
				break
			}
			x |= (uint32(b) & 0x7f) << shift
			if b < 0x80 {
				break
			}
		}
		o.Seats = x

		if i == len(data) {
			return io.EOF
		}
		header = data[i]
		i++
	}

	if header == 2 {
		var x uint32
		for shift := uint(0); ; shift += 7 {
			if i == len(data) {
				return io.EOF
			}
			b := data[i]
			i++
			if shift == 28 {
				x |= uint32(b) << 28
				break
			}
			x |= (uint32(b) & 0x7f) << shift
			if b < 0x80 {
				break
			}
		}

		to := i + int(x)
		if to >= len(data) {
			return io.EOF
		}
		o.Title = string(data[i:to])

		header = data[to]
		i = to + 1
	}

	if header == 3 {
		v := new(common.Meta)
		err := v.UnmarshalBinary(data[i:])
		switch e := err.(type) {
		case ColferContinue:
			i += int(e)
		case nil:
			return io.EOF
		default:
			return err
		}
		o.Meta = v

		header = data[i]
		i++
	}

	if header == 4 {
		var x uint32
		for shift := uint(0); ; shift += 7 {
			if i == len(data) {
				return io.EOF
			}
			b := data[i]
			i++
			if shift == 28 {
				x |= uint32(b) << 28
				break
			}
			x |= (uint32(b) & 0x7f) << shift
			if b < 0x80 {
				break
			}
		}

		a := make([]*Lesson, int(x))
		for ai, _ := range a {
			v := new(Lesson)
			a[ai] = v

			err := v.UnmarshalBinary(data[i:])
			switch e := err.(type) {
			case ColferContinue:
				i += int(e)
			case nil:
				return io.EOF
			default:
				return err
			}
		}
		o.Lessons = a

		if i == len(data) {
			return io.EOF
		}
		header = data[i]
		i++
	}

	if header != 0x7f {
		return ColferError(i - 1)
	}
	if i != len(data) {
		return ColferContinue(i)
	}
	return nil
}

type Lesson struct {
	Since	time.Time
	Summary	[]byte
}

// MarshalTo encodes o as Colfer into buf and returns the number of bytes written.
// If the buffer is too small, MarshalTo will panic.
func (o *Lesson) MarshalTo(buf []byte) int {
	if o == nil {
		return 0
	}

	var i int

	if v := o.Since; !v.IsZero() {
		buf[i] = 0
		s, ns := v.Unix(), v.Nanosecond()
		buf[i+1], buf[i+2], buf[i+3], buf[i+4] = byte(s>>56), byte(s>>48), byte(s>>40), byte(s>>32)
		buf[i+5], buf[i+6], buf[i+7], buf[i+8] = byte(s>>24), byte(s>>16), byte(s>>8), byte(s)
		if ns == 0 {
			i += 9
		} else {
			buf[i] |= 0x80
			buf[i+9], buf[i+10], buf[i+11], buf[i+12] = byte(ns>>24), byte(ns>>16), byte(ns>>8), byte(ns)
			i += 13
		}
	}

	if v := o.Summary; len(v) != 0 {
		buf[i] = 1
		i++
		x := uint(len(v))
		for x >= 0x80 {
			buf[i] = byte(x | 0x80)
			x >>= 7
			i++
		}
		buf[i] = byte(x)
		i++
		copy(buf[i:], v)
		i += len(v)
	}

	buf[i] = 0x7f
	i++
	return i
}

// MarshalLen returns the Colfer serial byte size.
func (o *Lesson) MarshalLen() int {
	if o == nil {
		return 0
	}

	l := 1

	if v := o.Since; !v.IsZero() {
		if v.Nanosecond() == 0 {
			l += 9
		} else {
			l += 13
		}
	}

	if x := len(o.Summary); x != 0 {
		l += x
		for x >= 0x80 {
			x >>= 7
			l++
		}
		l += 2
	}

	return l
}

// MarshalBinary encodes o as Colfer conform encoding.BinaryMarshaler.
// The error return is always nil.
func (o *Lesson) MarshalBinary() (data []byte, err error) {
	data = make([]byte, o.MarshalLen())
	o.MarshalTo(data)
	return data, nil
}

// UnmarshalBinary decodes data as Colfer conform encoding.BinaryUnmarshaler.
// The error return options are io.EOF, demo/api.ColferError, and demo/api.ColferContinue.
func (o *Lesson) UnmarshalBinary(data []byte) error {
	if len(data) == 0 {
		return io.EOF
	}

	header := data[0]
	i := 1

	if header == 0 {
		if i+8 >= len(data) {
			return io.EOF
		}
		sec := uint64(data[i])<<56 | uint64(data[i+1])<<48 | uint64(data[i+2])<<40 | uint64(data[i+3])<<32
		sec |= uint64(data[i+4])<<24 | uint64(data[i+5])<<16 | uint64(data[i+6])<<8 | uint64(data[i+7])
		o.Since = time.Unix(int64(sec), 0)

		header = data[i+8]
		i += 9
	} else if header == 0|0x80 {
		if i+12 >= len(data) {
			return io.EOF
		}
		sec := uint64(data[i])<<56 | uint64(data[i+1])<<48 | uint64(data[i+2])<<40 | uint64(data[i+3])<<32
		sec |= uint64(data[i+4])<<24 | uint64(data[i+5])<<16 | uint64(data[i+6])<<8 | uint64(data[i+7])
		nsec := int64(uint(data[i+8])<<24 | uint(data[i+9])<<16 | uint(data[i+10])<<8 | uint(data[i+11]))
		o.Since = time.Unix(int64(sec), nsec)

		header = data[i+12]
		i += 13
	}

	if header == 1 {
		var x uint32
		for shift := uint(0); ; shift += 7 {
			if i == len(data) {
				return io.EOF
			}
			b := data[i]
			i++
			if shift == 28 {
				x |= uint32(b) << 28
				break
			}
			x |= (uint32(b) & 0x7f) << shift
			if b < 0x80 {
				break
			}
		}

		length := int(x)
		to := i + length
		if to >= len(data) {
			return io.EOF
		}
		v := make([]byte, length)
		copy(v, data[i:])
		o.Summary = v

		header = data[to]
		i = to + 1
	}

	if header != 0x7f {
		return ColferError(i - 1)
	}
	if i != len(data) {
		return ColferContinue(i)
	}
	return nil
}
"#;

const GOLDEN_COMMON: &str = r#"package common

// This file was generated by colf(1); DO NOT EDIT

import (
	"fmt"
	"io"
	"math"
	"time"
)

// Reference imports to suppress errors if they are not otherwise used.
var _ = math.E
var _ = time.RFC3339

// ColferContinue signals a data continuation as a byte index.
type ColferContinue int

func (i ColferContinue) Error() string {
	return fmt.Sprintf("colfer: data continuation at byte %d", i)
}

// ColferError signals a data mismatch as as a byte index.
type ColferError int

func (i ColferError) Error() string {
	return fmt.Sprintf("colfer: unknown header at byte %d", i)
}

type Meta struct {
	Tag	int32
}

// MarshalTo encodes o as Colfer into buf and returns the number of bytes written.
// If the buffer is too small, MarshalTo will panic.
func (o *Meta) MarshalTo(buf []byte) int {
	if o == nil {
		return 0
	}

	var i int

	if v := o.Tag; v != 0 {
		x := uint32(v)
		if v >= 0 {
			buf[i] = 0
		} else {
			x = ^x + 1
			buf[i] = 0 | 0x80
		}
		i++
		for x >= 0x80 {
			buf[i] = byte(x | 0x80)
			x >>= 7
			i++
		}
		buf[i] = byte(x)
		i++
	}

	buf[i] = 0x7f
	i++
	return i
}

// MarshalLen returns the Colfer serial byte size.
func (o *Meta) MarshalLen() int {
	if o == nil {
		return 0
	}

	l := 1

	if v := o.Tag; v != 0 {
		x := uint32(v)
		if v < 0 {
			x = ^x + 1
		}
		for x >= 0x80 {
			x >>= 7
			l++
		}
		l += 2
	}

	return l
}

// MarshalBinary encodes o as Colfer conform encoding.BinaryMarshaler.
// The error return is always nil.
func (o *Meta) MarshalBinary() (data []byte, err error) {
	data = make([]byte, o.MarshalLen())
	o.MarshalTo(data)
	return data, nil
}

// UnmarshalBinary decodes data as Colfer conform encoding.BinaryUnmarshaler.
// The error return options are io.EOF, common.ColferError, and common.ColferContinue.
func (o *Meta) UnmarshalBinary(data []byte) error {
	if len(data) == 0 {
		return io.EOF
	}

	header := data[0]
	i := 1

	if header == 0 || header == 0|0x80 {
		var x uint32
		for shift := uint(0); ; shift += 7 {
			if i == len(data) {
				return io.EOF
			}
			b := data[i]
			i++
			if shift == 28 {
				x |= uint32(b) << 28
				break
			}
			x |= (uint32(b) & 0x7f) << shift
			if b < 0x80 {
				break
			}
		}
		if header&0x80 != 0 {
			x = ^x + 1
		}
		o.Tag = int32(x)

		if i == len(data) {
			return io.EOF
		}
		header = data[i]
		i++
	}

	if header != 0x7f {
		return ColferError(i - 1)
	}
	if i != len(data) {
		return ColferContinue(i)
	}
	return nil
}
"#;

#[test]
fn test_generate_golden() {
    let dir = tempfile::tempdir().unwrap();
    let mut packages = course_schema();
    generate(dir.path(), &mut packages).unwrap();

    let api = fs::read_to_string(dir.path().join("demo").join("api").join("Colfer.go")).unwrap();
    assert_eq!(GOLDEN_API, api);

    let common = fs::read_to_string(dir.path().join("common").join("Colfer.go")).unwrap();
    assert_eq!(GOLDEN_COMMON, common);
}

#[test]
fn test_generate_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let mut packages = course_schema();
    generate(first.path(), &mut packages).unwrap();
    // decorated input generates the same bytes again
    generate(second.path(), &mut packages).unwrap();

    for rel in ["demo/api/Colfer.go", "common/Colfer.go"] {
        let a = fs::read(first.path().join(rel)).unwrap();
        let b = fs::read(second.path().join(rel)).unwrap();
        assert_eq!(a, b, "{rel} differs between runs");
    }
}

#[test]
fn test_generate_stops_at_first_error() {
    let dir = tempfile::tempdir().unwrap();
    // a plain file where the "demo" directory belongs
    fs::write(dir.path().join("demo"), b"in the way").unwrap();

    let mut packages = course_schema();
    let err = generate(dir.path(), &mut packages).unwrap_err();
    match err {
        Error::MakeDir(path, _) => {
            assert_eq!(dir.path().join("demo").join("api"), path);
        }
        other => panic!("want MakeDir, got {other:?}"),
    }
    // the second package was never processed
    assert!(!dir.path().join("common").exists());
}
