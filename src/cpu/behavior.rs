// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]

use super::*;
use rand::random;

impl CPU {
    /// Dispatches a single decoded [Insn].
    ///
    /// The match is exhaustive: adding a variant to [Insn] will not compile
    /// until it is handled here.
    #[rustfmt::skip]
    pub(super) fn execute(&mut self, mem: &mut Mem, screen: &mut Screen, insn: Insn) -> Result<()> {
        match insn {
            Insn::cls               => self.clear_screen(screen),
            Insn::ret               => self.ret()?,
            Insn::jmp   { nnn }     => self.jump(nnn),
            Insn::call  { nnn }     => self.call(nnn)?,
            Insn::seb   { x, kk }   => self.skip_equals_immediate(x, kk),
            Insn::sneb  { x, kk }   => self.skip_not_equals_immediate(x, kk),
            Insn::se    { x, y }    => self.skip_equals(x, y),
            Insn::movb  { x, kk }   => self.load_immediate(x, kk),
            Insn::addb  { x, kk }   => self.add_immediate(x, kk),
            Insn::mov   { x, y }    => self.load(x, y),
            Insn::or    { x, y }    => self.or(x, y),
            Insn::and   { x, y }    => self.and(x, y),
            Insn::xor   { x, y }    => self.xor(x, y),
            Insn::add   { x, y }    => self.add(x, y),
            Insn::sub   { x, y }    => self.sub(x, y),
            Insn::shr   { x, .. }   => self.shift_right(x),
            Insn::bsub  { x, y }    => self.backwards_sub(x, y),
            Insn::shl   { x, .. }   => self.shift_left(x),
            Insn::sne   { x, y }    => self.skip_not_equals(x, y),
            Insn::movi  { nnn }     => self.load_i_immediate(nnn),
            Insn::jmpr  { nnn }     => self.jump_indexed(nnn),
            Insn::rand  { x, kk }   => self.rand(x, kk),
            Insn::draw  { x, y, n } => self.draw(x, y, n, mem, screen)?,
            Insn::sek   { x }       => self.skip_key_equals(x),
            Insn::snek  { x }       => self.skip_key_not_equals(x),
            Insn::getdt { x }       => self.load_delay_timer(x),
            Insn::waitk { x }       => self.wait_for_key(x),
            Insn::setdt { x }       => self.store_delay_timer(x),
            Insn::setst { x }       => self.store_sound_timer(x),
            Insn::addi  { x }       => self.add_i(x),
            Insn::font  { x }       => self.load_sprite(x),
            Insn::bcd   { x }       => self.bcd_convert(x, mem)?,
            Insn::dmao  { x }       => self.store_dma(x, mem)?,
            Insn::dmai  { x }       => self.load_dma(x, mem)?,
            Insn::unknown { word }  => return Err(Error::UnknownInstruction { word }),
        }
        Ok(())
    }

    /// Skips the next instruction
    fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

/// |`0bbb`| System routines
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    pub(super) fn clear_screen(&mut self, screen: &mut Screen) {
        screen.clear();
    }
    /// |`00ee`| Returns from subroutine; [Error::StackUnderflow] with nothing
    /// to return to
    pub(super) fn ret(&mut self) -> Result<()> {
        self.pc = self.stack.pop().ok_or(Error::StackUnderflow)?;
        Ok(())
    }
}

/// |`1nnn`| Sets pc to an absolute address
impl CPU {
    /// |`1nnn`| Sets the program counter to an absolute address
    pub(super) fn jump(&mut self, nnn: Adr) {
        self.pc = nnn;
    }
}

/// |`2nnn`| Pushes pc onto the stack, then jumps to nnn
impl CPU {
    /// |`2nnn`| Pushes pc onto the stack, then jumps to nnn.
    /// [Error::StackOverflow] at depth [STACK_DEPTH], before anything moves.
    pub(super) fn call(&mut self, nnn: Adr) -> Result<()> {
        if self.stack.len() >= STACK_DEPTH {
            return Err(Error::StackOverflow {
                depth: self.stack.len(),
            });
        }
        self.stack.push(self.pc);
        self.pc = nnn;
        Ok(())
    }
}

/// |`3xkk`..`5xy0`, `9xy0`| Conditional skips
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`3xkk`| Skip next instruction if vX == kk  |
/// |`4xkk`| Skip next instruction if vX != kk  |
/// |`5xy0`| Skip next instruction if vX == vY  |
/// |`9xy0`| Skip next instruction if vX != vY  |
impl CPU {
    /// |`3xkk`| Skips the next instruction if register X == kk
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, kk: u8) {
        if self.v[x] == kk {
            self.skip();
        }
    }
    /// |`4xkk`| Skips the next instruction if register X != kk
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, kk: u8) {
        if self.v[x] != kk {
            self.skip();
        }
    }
    /// |`5xy0`| Skips the next instruction if register X == register Y
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] == self.v[y] {
            self.skip();
        }
    }
    /// |`9xy0`| Skips the next instruction if register X != register Y
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] != self.v[y] {
            self.skip();
        }
    }
}

/// |`6xkk`, `7xkk`| Immediate loads
impl CPU {
    /// |`6xkk`| Loads immediate byte kk into register vX
    pub(super) fn load_immediate(&mut self, x: Reg, kk: u8) {
        self.v[x] = kk;
    }
    /// |`7xkk`| Adds immediate byte kk to register vX, wrapping. No flag.
    pub(super) fn add_immediate(&mut self, x: Reg, kk: u8) {
        self.v[x] = self.v[x].wrapping_add(kk);
    }
}

/// |`8xyn`| ALU operations
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; vF = carry              |
/// |`8xy5`| X = X - Y; vF = no borrow          |
/// |`8xy6`| X = X >> 1; vF = old bit 0         |
/// |`8xy7`| X = Y - X; vF = no borrow          |
/// |`8xyE`| X = X << 1; vF = old bit 7         |
///
/// The flag is written after the result, so the flag value wins when X is
/// vF itself.
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let carry;
        (self.v[x], carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[0xf] = carry.into();
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[x].overflowing_sub(self.v[y]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    pub(super) fn shift_right(&mut self, x: Reg) {
        let shift_out = self.v[x] & 1;
        self.v[x] >>= 1;
        self.v[0xf] = shift_out;
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[y].overflowing_sub(self.v[x]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    pub(super) fn shift_left(&mut self, x: Reg) {
        let shift_out = self.v[x] >> 7;
        self.v[x] <<= 1;
        self.v[0xf] = shift_out;
    }
}

/// |`Annn`, `Bnnn`| Index register and indexed jump
impl CPU {
    /// |`Annn`| Load address nnn into register I
    pub(super) fn load_i_immediate(&mut self, nnn: Adr) {
        self.i = nnn;
    }
    /// |`Bnnn`| Jump to nnn + v0. A target past 0xFFF is caught by the next
    /// fetch, not here.
    pub(super) fn jump_indexed(&mut self, nnn: Adr) {
        self.pc = nnn.wrapping_add(self.v[0] as Adr);
    }
}

/// |`Cxkk`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxkk`| Stores a random number & the provided byte into vX
    pub(super) fn rand(&mut self, x: Reg, kk: u8) {
        self.v[x] = random::<u8>() & kk;
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite from memory at I to the screen at
    /// coordinates (vX, vY); vF = collision
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib, mem: &Mem, screen: &mut Screen) -> Result<()> {
        let sprite = mem.sprite(self.i, n)?;
        self.v[0xf] = screen.blit(sprite, self.v[x], self.v[y]).into();
        Ok(())
    }
}

/// |`Exkk`| Skips instruction on state of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`Ex9E`| Skip next instruction if key == vX |
/// |`ExA1`| Skip next instruction if key != vX |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key == vX
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        if self.keys[self.v[x] as usize & 0xf] {
            self.skip();
        }
    }
    /// |`ExA1`| Skip next instruction if key != vX
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        if !self.keys[self.v[x] as usize & 0xf] {
            self.skip();
        }
    }
}

/// |`Fxkk`| Timers, input wait, and memory transfers
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`Fx07`| Set vX to value in delay timer     |
/// |`Fx0A`| Wait for input, store key in vX    |
/// |`Fx15`| Set delay timer to the value in vX |
/// |`Fx18`| Set sound timer to the value in vX |
/// |`Fx1E`| Add vX to I                        |
/// |`Fx29`| Load font sprite for vX into I     |
/// |`Fx33`| BCD convert vX into I..I+3         |
/// |`Fx55`| Store v0..=vX to memory at I       |
/// |`Fx65`| Load v0..=vX from memory at I      |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.delay;
    }
    /// |`Fx0A`| Stops fetching instructions until a key press arrives, then
    /// stores that key's value in vX. The press itself is consumed by
    /// [CPU::press].
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        self.status = Status::WaitingForKey { x };
    }
    /// |`Fx15`| Load vX into DT
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.delay = self.v[x];
    }
    /// |`Fx18`| Load vX into ST
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.sound = self.v[x];
    }
    /// |`Fx1E`| Add vX to I, mod 4096.
    ///
    /// # Quirk
    /// [quirks::Quirks::index_carry] additionally sets vF when the sum
    /// passes 0xFFF.
    pub(super) fn add_i(&mut self, x: Reg) {
        let sum = self.i + self.v[x] as Adr;
        if self.flags.quirks.index_carry {
            self.v[0xf] = (sum > 0xfff).into();
        }
        self.i = sum & 0xfff;
    }
    /// |`Fx29`| Load font sprite for the digit in vX (low nibble) into I
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = Mem::font_sprite(self.v[x]);
    }
    /// |`Fx33`| BCD convert vX into memory at I..I+3
    pub(super) fn bcd_convert(&mut self, x: Reg, mem: &mut Mem) -> Result<()> {
        let value = self.v[x];
        mem.write(self.i, value / 100)?;
        mem.write(self.i.wrapping_add(1), value / 10 % 10)?;
        mem.write(self.i.wrapping_add(2), value % 10)?;
        Ok(())
    }
    /// |`Fx55`| Store registers v0..=vX into memory at I. I is unchanged.
    pub(super) fn store_dma(&mut self, x: Reg, mem: &mut Mem) -> Result<()> {
        for reg in 0..=x {
            mem.write(self.i.wrapping_add(reg as Adr), self.v[reg])?;
        }
        Ok(())
    }
    /// |`Fx65`| Load registers v0..=vX from memory at I. I is unchanged.
    pub(super) fn load_dma(&mut self, x: Reg, mem: &Mem) -> Result<()> {
        for reg in 0..=x {
            self.v[reg] = mem.read(self.i.wrapping_add(reg as Adr))?;
        }
        Ok(())
    }
}
