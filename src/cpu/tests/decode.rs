// This code is licensed under MIT license (see LICENSE for details)

//! Exercises [Insn::decode] against every operation family, and checks that
//! unmatched sub-opcodes classify as [Insn::unknown] rather than aliasing a
//! neighboring operation.

use super::*;

/// Asserts that a word decodes to the expected [Insn]
macro_rules! decodes {
    ($($word:literal => $insn:expr),+ $(,)?) => {
        $(assert_eq!(Insn::decode($word), $insn);)+
    };
}

#[test]
#[rustfmt::skip]
fn sys() {
    decodes! {
        0x00e0 => Insn::cls,
        0x00ee => Insn::ret,
    };
}

#[test]
#[rustfmt::skip]
fn cf() {
    decodes! {
        0x1234 => Insn::jmp  { nnn: 0x234 },
        0x2345 => Insn::call { nnn: 0x345 },
        0x3b42 => Insn::seb  { x: 0xb, kk: 0x42 },
        0x4b42 => Insn::sneb { x: 0xb, kk: 0x42 },
        0x5b70 => Insn::se   { x: 0xb, y: 0x7 },
        0x9b70 => Insn::sne  { x: 0xb, y: 0x7 },
        0xbfff => Insn::jmpr { nnn: 0xfff },
    };
}

#[test]
#[rustfmt::skip]
fn math() {
    decodes! {
        0x6b42 => Insn::movb { x: 0xb, kk: 0x42 },
        0x7b42 => Insn::addb { x: 0xb, kk: 0x42 },
        0x8b70 => Insn::mov  { x: 0xb, y: 0x7 },
        0x8b71 => Insn::or   { x: 0xb, y: 0x7 },
        0x8b72 => Insn::and  { x: 0xb, y: 0x7 },
        0x8b73 => Insn::xor  { x: 0xb, y: 0x7 },
        0x8b74 => Insn::add  { x: 0xb, y: 0x7 },
        0x8b75 => Insn::sub  { x: 0xb, y: 0x7 },
        0x8b76 => Insn::shr  { x: 0xb, y: 0x7 },
        0x8b77 => Insn::bsub { x: 0xb, y: 0x7 },
        0x8b7e => Insn::shl  { x: 0xb, y: 0x7 },
        0xcb42 => Insn::rand { x: 0xb, kk: 0x42 },
    };
}

#[test]
#[rustfmt::skip]
fn index_and_draw() {
    decodes! {
        0xa123 => Insn::movi { nnn: 0x123 },
        0xdb75 => Insn::draw { x: 0xb, y: 0x7, n: 0x5 },
        0xdb70 => Insn::draw { x: 0xb, y: 0x7, n: 0x0 },
    };
}

#[test]
#[rustfmt::skip]
fn io() {
    decodes! {
        0xeb9e => Insn::sek   { x: 0xb },
        0xeba1 => Insn::snek  { x: 0xb },
        0xfb07 => Insn::getdt { x: 0xb },
        0xfb0a => Insn::waitk { x: 0xb },
        0xfb15 => Insn::setdt { x: 0xb },
        0xfb18 => Insn::setst { x: 0xb },
        0xfb1e => Insn::addi  { x: 0xb },
        0xfb29 => Insn::font  { x: 0xb },
        0xfb33 => Insn::bcd   { x: 0xb },
        0xfb55 => Insn::dmao  { x: 0xb },
        0xfb65 => Insn::dmai  { x: 0xb },
    };
}

/// Every undocumented word classifies as unknown, carrying the word
#[test]
#[rustfmt::skip]
fn unknown() {
    for word in [
        0x0000, // 0nnn machine-code call is not implemented
        0x0123,
        0x00e1,
        0x5b71, // 5xyn with n != 0
        0x5b7f,
        0x8b78, // 8xyn gap between 7 and e
        0x8b7d,
        0x8b7f,
        0x9b71, // 9xyn with n != 0
        0xeb00,
        0xeb9f,
        0xeba0,
        0xebff,
        0xfb00,
        0xfb16,
        0xfb30,
        0xfb66,
        0xfbff,
    ] {
        assert_eq!(Insn::decode(word), Insn::unknown { word });
    }
}

/// The mnemonic formatting stays stable
#[test]
#[rustfmt::skip]
fn display() {
    for (word, text) in [
        (0x00e0, "cls"),
        (0x1234, "jmp    234"),
        (0x6b42, "mov    #42, vB"),
        (0x8b75, "sub    v7, vB"),
        (0xdb75, "draw   #5, vB, v7"),
        (0xfb0a, "waitk  vB"),
        (0x8b7f, "db     8b7f"),
    ] {
        assert_eq!(Insn::decode(word).to_string().trim_end(), text);
    }
}
