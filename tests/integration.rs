// This code is licensed under MIT license (see LICENSE for details)

//! Testing methods on the public interface of the whole machine

use ocho::*;

/// Builds a machine with `program` already loaded
fn mach(program: &[u8]) -> Chip8 {
    let mut ch8 = Chip8::default();
    ch8.load_image(program).unwrap();
    ch8
}

mod chip8 {
    use super::*;
    #[test]
    fn default() {
        let ch8 = Chip8::default();
        assert_eq!(ch8.cpu.pc(), 0x200);
        assert_eq!(ch8.cpu.cycle(), 0);
        assert!(ch8.screen.is_blank());
    }

    #[test]
    fn clone_eq() {
        let ch8 = mach(&[0x63, 0x2a]);
        let clone = ch8.clone();
        assert_eq!(ch8, clone);
    }

    #[test]
    fn debug_formats() {
        let ch8 = Chip8::default();
        assert!(!format!("{ch8:?}").is_empty());
    }

    /// Reset rewinds the cpu and screen, but leaves the loaded image alone
    #[test]
    fn reset() {
        let mut ch8 = mach(&[0x63, 0x2a, 0xd3, 0x31]);
        ch8.step().unwrap();
        ch8.step().unwrap();
        assert!(!ch8.screen.is_blank());

        ch8.reset();
        assert_eq!(ch8.cpu.pc(), 0x200);
        assert!(ch8.screen.is_blank());
        // image survives: replay gives the same state
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0x3], 0x2a);
    }

    /// The image must fit between the load address and end of memory
    #[test]
    fn image_size_limit() {
        let mut ch8 = Chip8::default();
        ch8.load_image(&[0u8; 0xe00]).unwrap();
        assert!(matches!(
            ch8.load_image(&[0u8; 0xe01]),
            Err(Error::ImageTooLarge { size: 0xe01 })
        ));
    }

    #[test]
    fn load_missing_rom() {
        assert!(Chip8::new("this/path/does/not.exist").is_err());
    }
}

mod program {
    use super::*;
    /// 6xkk then 8xy5, both directions of the borrow
    #[test]
    fn sub_borrow() {
        let mut ch8 = mach(&[
            0x60, 0x05, // mov #05, v0
            0x61, 0x03, // mov #03, v1
            0x80, 0x15, // sub v1, v0
        ]);
        for _ in 0..3 {
            ch8.step().unwrap();
        }
        assert_eq!(ch8.cpu.v()[0x0], 2);
        assert_eq!(ch8.cpu.v()[0xf], 1);

        let mut ch8 = mach(&[
            0x60, 0x03, // mov #03, v0
            0x61, 0x05, // mov #05, v1
            0x80, 0x15, // sub v1, v0
        ]);
        for _ in 0..3 {
            ch8.step().unwrap();
        }
        assert_eq!(ch8.cpu.v()[0x0], 254);
        assert_eq!(ch8.cpu.v()[0xf], 0);
    }

    /// 00e0 on a blank screen is a no-op
    #[test]
    fn clear_is_idempotent() {
        let mut ch8 = mach(&[0x00, 0xe0, 0x00, 0xe0]);
        ch8.step().unwrap();
        let cleared = ch8.screen.clone();
        ch8.step().unwrap();
        assert_eq!(cleared, ch8.screen);
    }

    /// Fx55 then Fx65 with the same I restores v0..=vX
    #[test]
    fn dma_round_trip() {
        let mut ch8 = mach(&[
            0xa3, 0x00, // mov $300, I
            0x60, 0x11, // mov #11, v0
            0x61, 0x22, // mov #22, v1
            0x62, 0x33, // mov #33, v2
            0xf2, 0x55, // dmao v2
            0x60, 0x00, // mov #00, v0
            0x61, 0x00, // mov #00, v1
            0x62, 0x00, // mov #00, v2
            0xf2, 0x65, // dmai v2
        ]);
        for _ in 0..9 {
            ch8.step().unwrap();
        }
        assert_eq!(&ch8.cpu.v()[..3], &[0x11, 0x22, 0x33]);
        assert_eq!(ch8.cpu.i(), 0x300);
    }

    /// Drawing the same sprite twice reports a collision and erases it
    #[test]
    fn draw_twice_collides() {
        let mut ch8 = mach(&[
            0xf0, 0x29, // font v0, I (v0 = 0, glyph for 0)
            0xd1, 0x25, // draw #5, v1, v2
            0xd1, 0x25, // draw #5, v1, v2
        ]);
        ch8.step().unwrap();
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0xf], 0);
        assert!(!ch8.screen.is_blank());

        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0xf], 1);
        assert!(ch8.screen.is_blank());
    }

    /// Sprite columns past the right edge clip; the row does not wrap
    #[test]
    fn draw_clips_right_edge() {
        let mut ch8 = mach(&[
            0x60, 0x3c, // mov #3c, v0 (x = 60)
            0xa2, 0x08, // mov $208, I
            0xd0, 0x11, // draw #1, v0, v1
            0x00, 0x00, // pad
            0xff, 0x00, // sprite data: one full row
        ]);
        for _ in 0..3 {
            ch8.step().unwrap();
        }
        for x in 60..64 {
            assert!(ch8.screen.pixel(x, 0), "pixel {x} should be lit");
        }
        for x in 0..4 {
            assert!(!ch8.screen.pixel(x, 0), "pixel {x} must not wrap around");
        }
    }

    /// The origin itself wraps on both axes
    #[test]
    fn draw_wraps_origin() {
        let mut ch8 = mach(&[
            0x60, 0x40, // mov #40, v0 (x = 64 wraps to 0)
            0x61, 0x22, // mov #22, v1 (y = 34 wraps to 2)
            0xa2, 0x08, // mov $208, I
            0xd0, 0x11, // draw #1, v0, v1
            0x80, 0x00, // sprite data: single pixel
        ]);
        for _ in 0..4 {
            ch8.step().unwrap();
        }
        assert!(ch8.screen.pixel(0, 2));
    }

    /// Sixteen nested calls fit; the seventeenth overflows and halts
    #[test]
    fn stack_depth() {
        // a chain of calls, each to the next instruction
        let mut program = vec![];
        for k in 0..17u16 {
            let target = 0x202 + k * 2;
            program.extend_from_slice(&(0x2000 | target).to_be_bytes());
        }
        let mut ch8 = mach(&program);
        for _ in 0..16 {
            ch8.step().unwrap();
        }
        assert!(matches!(
            ch8.step(),
            Err(Error::StackOverflow { depth: 16 })
        ));
        assert!(ch8.cpu.is_halted());
    }

    /// Returning with an empty stack underflows and halts
    #[test]
    fn return_underflows() {
        let mut ch8 = mach(&[0x00, 0xee]);
        assert!(matches!(ch8.step(), Err(Error::StackUnderflow)));
        assert!(ch8.cpu.is_halted());
    }

    /// An undocumented word is an error the driver may skip; the machine
    /// stays usable
    #[test]
    fn unknown_word_is_skippable() {
        let mut ch8 = mach(&[
            0x5a, 0xb1, // 5xy1 is not a documented operation
            0x63, 0x2a, // mov #2a, v3
        ]);
        assert!(matches!(
            ch8.step(),
            Err(Error::UnknownInstruction { word: 0x5ab1 })
        ));
        assert!(!ch8.cpu.is_halted());
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0x3], 0x2a);
    }

    /// A five cycle smoke test: clear, point I at a glyph, position it,
    /// draw it
    #[test]
    fn draw_glyph_scenario() {
        let mut ch8 = mach(&[
            0x00, 0xe0, // cls
            0xa2, 0x2a, // mov $22a, I
            0x60, 0x20, // mov #20, v0
            0x61, 0x0c, // mov #0c, v1
            0xd0, 0x15, // draw #5, v0, v1
        ]);
        let glyph = [0xf0, 0x90, 0x90, 0x90, 0xf0];
        for (k, byte) in glyph.into_iter().enumerate() {
            ch8.mem.write(0x22a + k as u16, byte).unwrap();
        }
        for _ in 0..5 {
            ch8.step().unwrap();
        }
        assert_eq!(ch8.cpu.pc(), 0x20a);
        assert_eq!(ch8.cpu.v()[0xf], 0);
        // the glyph's top row lands at (32, 12)
        for (x, lit) in [(32, true), (33, true), (34, true), (35, true), (36, false)] {
            assert_eq!(ch8.screen.pixel(x, 12), lit);
        }
        // and its hollow middle
        assert!(ch8.screen.pixel(32, 14));
        assert!(!ch8.screen.pixel(33, 14));
    }
}

mod input {
    use super::*;
    /// Fx0A blocks until a press arrives, and consumes exactly one press
    #[test]
    fn wait_for_key() {
        let mut ch8 = mach(&[
            0xf5, 0x0a, // waitk v5
            0x63, 0x2a, // mov #2a, v3
        ]);
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.status(), Status::WaitingForKey { x: 0x5 });

        // blocked ticks change nothing
        let blocked = ch8.clone();
        ch8.step().unwrap();
        assert_eq!(blocked, ch8);

        ch8.cpu.press(0xa).unwrap();
        assert_eq!(ch8.cpu.status(), Status::Running);
        assert_eq!(ch8.cpu.v()[0x5], 0xa);

        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0x3], 0x2a);
    }

    /// Holding a key satisfies Ex9E skips until it is released
    #[test]
    fn skip_on_key() {
        let mut ch8 = mach(&[
            0xe0, 0x9e, // sek v0 (key 0)
            0x63, 0x01, // mov #01, v3 (skipped when held)
            0x63, 0x02, // mov #02, v3
        ]);
        ch8.cpu.press(0x0).unwrap();
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.pc(), 0x204);
        ch8.step().unwrap();
        assert_eq!(ch8.cpu.v()[0x3], 0x02);
    }

    #[test]
    fn invalid_key_rejected() {
        let mut ch8 = Chip8::default();
        assert!(matches!(
            ch8.cpu.press(0x10),
            Err(Error::InvalidKey { key: 0x10 })
        ));
    }
}

mod timers {
    use super::*;
    /// Timers count down at the driver's rate and stop at zero
    #[test]
    fn countdown() {
        let mut ch8 = mach(&[
            0x60, 0x02, // mov #02, v0
            0xf0, 0x15, // mov v0, DT
            0xf0, 0x18, // mov v0, ST
        ]);
        for _ in 0..3 {
            ch8.step().unwrap();
        }
        assert_eq!(ch8.cpu.delay(), 2);
        assert_eq!(ch8.cpu.sound(), 2);
        for _ in 0..5 {
            ch8.tick_timers();
        }
        assert_eq!(ch8.cpu.delay(), 0);
        assert_eq!(ch8.cpu.sound(), 0);
    }
}
