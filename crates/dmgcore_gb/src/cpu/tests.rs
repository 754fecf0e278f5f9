use super::*;

struct TestBus {
    memory: [u8; 0x10000],
    wake: bool,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            wake: false,
        }
    }
}

impl TestBus {
    fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn stop_wake(&mut self) -> bool {
        self.wake
    }
}

/// CPU at the post-boot entry point with `program` loaded at 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.load(0x0100, program);
    (Cpu::new(), bus)
}

fn step_ticks(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus);
    cpu.clock().last().ticks
}

#[test]
fn post_boot_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.total_ticks(), 0);
}

#[test]
fn config_controls_entry_point_and_ime() {
    let config = CpuConfig::builder()
        .entry_point(0x0000)
        .ime_on_power_on(true)
        .build();
    let cpu = Cpu::with_config(config);
    assert_eq!(cpu.regs.pc, 0x0000);
    assert!(cpu.ime);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.clock().last(), Cost::from_mcycles(1));
}

#[test]
fn ld_a_immediate() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x42);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn add_immediate_wraps_to_zero_with_all_carries() {
    let (mut cpu, mut bus) = setup(&[0xC6, 0x01]);
    cpu.regs.set_a(0xFF);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H | Flags::C);
}

#[test]
fn ld_16bit_and_indirect_forms() {
    // LD BC,0xC123 ; LD (BC),A ; LD A,(HL+) ; LD (HL-),A ; LD C,A
    let (mut cpu, mut bus) = setup(&[0x01, 0x23, 0xC1, 0x02, 0x2A, 0x32, 0x4F]);
    cpu.regs.set_a(0xAB);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x5A;

    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0xC123);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC123], 0xAB);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC001], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.c(), 0x5A);
}

#[test]
fn ld_imm16_sp_stores_little_endian() {
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(step_ticks(&mut cpu, &mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn ldh_uses_high_io_page() {
    // LDH (0x80),A ; LD C,0x81 ; LD (C),A
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0x0E, 0x81, 0xE2]);
    cpu.regs.set_a(0x77);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x77);
    cpu.step(&mut bus);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xFF81], 0x77);
}

#[test]
fn inc_dec_preserve_carry() {
    // INC B ; DEC B ; DEC B
    let (mut cpu, mut bus) = setup(&[0x04, 0x05, 0x05]);
    cpu.regs.set_b(0xFF);
    cpu.regs.set_flags(Flags::C);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b(), 0x00);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H | Flags::C);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b(), 0xFF);
    assert_eq!(cpu.regs.flags(), Flags::N | Flags::H | Flags::C);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b(), 0xFE);
    assert_eq!(cpu.regs.flags(), Flags::N | Flags::C);
}

#[test]
fn inc_hl_indirect_costs_three_mcycles() {
    let (mut cpu, mut bus) = setup(&[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert!(cpu.flag(Flags::H));
}

#[test]
fn add_hl_keeps_zero_flag() {
    let (mut cpu, mut bus) = setup(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.set_flags(Flags::Z | Flags::N);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H);
}

#[test]
fn add_sp_signed_immediate() {
    let (mut cpu, mut bus) = setup(&[0xE8, 0x08]);
    cpu.regs.sp = 0xFFF8;
    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.regs.flags(), Flags::H | Flags::C);
}

#[test]
fn ld_hl_sp_offset_and_ld_sp_hl() {
    // LD HL,SP-1 ; LD SP,HL
    let (mut cpu, mut bus) = setup(&[0xF8, 0xFF, 0xF9]);
    cpu.regs.sp = 0xD000;
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xCFFF);
    assert_eq!(cpu.regs.flags(), Flags::empty());
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.sp, 0xCFFF);
}

#[test]
fn push_pop_roundtrip_and_pop_af_masks_low_nibble() {
    // PUSH BC ; POP DE ; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xD1, 0xF1]);
    cpu.regs.set_bc(0x1234);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x3F;
    bus.memory[0xFFFD] = 0x12;
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.af(), 0x1230);
}

#[test]
fn call_pushes_return_address_and_ret_pops_it() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x50, 0x01]);
    bus.memory[0x0150] = 0xC9;

    assert_eq!(step_ticks(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.read16(0xFFFC), 0x0103);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn jr_offsets_at_both_extremes() {
    let (mut cpu, mut bus) = setup(&[0x18, 0x80]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0082);

    let (mut cpu, mut bus) = setup(&[0x18, 0x7F]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0181);
}

#[test]
fn jr_wraps_around_address_space() {
    let mut bus = TestBus::default();
    bus.load(0x0000, &[0x18, 0x80]);
    let mut cpu = Cpu::with_config(CpuConfig::builder().entry_point(0x0000).build());
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0xFF82);
}

#[test]
fn conditional_costs_depend_on_branch() {
    // Post-boot F = Z H C.
    // JR NZ,+5 (not taken) ; JR Z,+5 (taken)
    let (mut cpu, mut bus) = setup(&[0x20, 0x05, 0x28, 0x05]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0109);

    // CALL NC (not taken) ; CALL C (taken)
    let (mut cpu, mut bus) = setup(&[0xD4, 0x00, 0x20, 0xDC, 0x00, 0x20]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x2000);

    // RET NZ (not taken) ; RET Z (taken)
    let (mut cpu, mut bus) = setup(&[0xC0, 0xC8]);
    cpu.regs.sp = 0xFFFC;
    bus.load(0xFFFC, &[0x34, 0x12]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x1234);

    // JP NC (not taken) ; JP C (taken)
    let (mut cpu, mut bus) = setup(&[0xD2, 0x00, 0x30, 0xDA, 0x00, 0x30]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x3000);
}

#[test]
fn jp_hl_and_rst() {
    // JP HL at 0x0100 with HL = 0x0200, then RST 28H at 0x0200.
    let (mut cpu, mut bus) = setup(&[0xE9]);
    cpu.regs.set_hl(0x0200);
    bus.memory[0x0200] = 0xEF;

    assert_eq!(step_ticks(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0200);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0201);
}

#[test]
fn cb_prefixed_instructions() {
    // BIT 7,H ; SET 0,(HL) ; BIT 0,(HL) ; SWAP A
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7C, 0xCB, 0xC6, 0xCB, 0x46, 0xCB, 0x37]);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);
    // H = 0x01: bit 7 clear. C survives.
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H | Flags::C);

    cpu.regs.set_hl(0xC000);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);

    assert_eq!(step_ticks(&mut cpu, &mut bus), 12);
    assert!(!cpu.flag(Flags::Z));

    cpu.regs.set_a(0xF1);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x1F);
    assert_eq!(cpu.regs.flags(), Flags::empty());

    assert_eq!(cpu.stats().secondary_count(0x7C), 1);
    assert_eq!(cpu.stats().primary_count(0xCB), 0);
    assert_eq!(cpu.stats().instructions, 4);
}

#[test]
fn res_clears_a_single_bit() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x87]);
    cpu.regs.set_a(0xFF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0xFE);
}

#[test]
fn vblank_dispatch_clears_only_its_pending_bit() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x05;

    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101);
    // NOP plus the entry sequence.
    assert_eq!(cpu.clock().last().ticks, 4 + INTERRUPT_ENTRY_COST.ticks);
    assert_eq!(cpu.stats().interrupt_count(Interrupt::VBlank), 1);
}

#[test]
fn only_highest_priority_interrupt_is_serviced() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = 0x18;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0058);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x10);
}

#[test]
fn disabled_interrupts_are_not_dispatched() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    assert_eq!(step_ticks(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);

    // Enabled mask excludes the pending line.
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x02;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn interrupt_vectors_and_priority() {
    let vectors: Vec<u16> = Interrupt::ALL.iter().map(|i| i.vector()).collect();
    assert_eq!(vectors, [0x40, 0x48, 0x50, 0x58, 0x60]);
    assert_eq!(
        Interrupt::highest_priority(Interrupts::LCD_STAT | Interrupts::JOYPAD),
        Some(Interrupt::LcdStat)
    );
    assert_eq!(Interrupt::highest_priority(Interrupts::empty()), None);
    assert_eq!(Interrupt::Timer.mask(), Interrupts::TIMER);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    // EI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0101);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0102);
}

#[test]
fn di_cancels_pending_ei() {
    // EI ; DI ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn reti_enables_ime_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xFFFC;
    bus.load(0xFFFC, &[0x34, 0x12]);
    assert_eq!(step_ticks(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(cpu.ime);
}

#[test]
fn halt_idles_until_interrupt_pending_even_with_ime_clear() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);

    assert!(!cpu.step(&mut bus));
    assert_eq!(cpu.run_state(), RunState::Halted);
    assert_eq!(cpu.regs.pc, 0x0101);

    assert!(!cpu.step(&mut bus));
    assert_eq!(cpu.clock().last().ticks, 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.stats().halted_steps, 1);

    bus.memory[IE_ADDR as usize] = 0x04;
    bus.memory[IF_ADDR as usize] = 0x04;
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn halt_with_ime_dispatches_on_wake() {
    let (mut cpu, mut bus) = setup(&[0x76]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;

    assert!(!cpu.step(&mut bus));
    bus.memory[IF_ADDR as usize] = 0x01;

    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101);
    assert_eq!(cpu.clock().last().ticks, 24);
}

#[test]
fn halt_bug_repeats_next_byte() {
    // HALT ; INC A
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0101);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x02);
    assert_eq!(cpu.regs.pc, 0x0101);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x03);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn ei_halt_with_pending_interrupt_returns_to_halt() {
    // EI ; HALT ; NOP, handler: JP $0200 ; RETI at $0200
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x00]);
    bus.load(0x0040, &[0xC3, 0x00, 0x02]);
    bus.load(0x0200, &[0xD9]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    assert!(!cpu.ime);

    // HALT sees IME still clear, then the EI delay lands and the same step
    // dispatches.
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0200);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert!(cpu.ime);

    // Nothing is pending any more, so the HALT now idles.
    assert!(!cpu.step(&mut bus));
    assert_eq!(cpu.run_state(), RunState::Halted);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn push_into_ie_can_cancel_dispatch() {
    let (mut cpu, mut bus) = setup(&[]);
    bus.load(0x0200, &[0x00]);
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0x0000;
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    // The high byte of 0x0201 replaced IE with 0x02, leaving no armed line.
    assert_eq!(bus.memory[IE_ADDR as usize], 0x02);
    assert_eq!(bus.memory[0xFFFE], 0x01);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0000);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);
    assert!(!cpu.ime);
    assert_eq!(cpu.clock().last().ticks, 24);
}

#[test]
fn push_into_ie_keeps_dispatch_when_line_survives() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.regs.sp = 0x0000;
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    // High byte 0x01 keeps VBlank enabled.
    assert_eq!(bus.memory[IE_ADDR as usize], 0x01);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xFFFE], 0x01);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
}

#[test]
fn stop_freezes_until_bus_wakes() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);

    assert!(!cpu.step(&mut bus));
    assert_eq!(cpu.run_state(), RunState::Stopped);
    assert_eq!(cpu.regs.pc, 0x0102);
    let frozen = cpu.total_ticks();

    assert!(!cpu.step(&mut bus));
    assert_eq!(cpu.clock().last(), Cost::ZERO);
    assert_eq!(cpu.total_ticks(), frozen);

    bus.wake = true;
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.total_ticks(), frozen + 4);
}

#[test]
fn undocumented_opcodes_are_nops() {
    let (mut cpu, mut bus) = setup(&[0xD3, 0xFD]);
    let before = cpu.regs;

    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.clock().last().ticks, 4);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.af(), before.af());
    assert!(cpu.take_diagnostics().is_empty());
}

#[test]
fn strict_mode_reports_undocumented_opcodes() {
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0x00, 0xDB]);
    let mut cpu = Cpu::with_config(CpuConfig::builder().strict(true).build());

    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(
        cpu.take_diagnostics(),
        vec![Diagnostic::UndocumentedOpcode {
            opcode: 0xDB,
            address: 0x0101,
        }]
    );
    assert!(cpu.take_diagnostics().is_empty());
}

#[test]
fn clock_totals_accumulate_across_steps() {
    // NOP ; LD A,d8 ; CALL a16
    let (mut cpu, mut bus) = setup(&[0x00, 0x3E, 0x01, 0xCD, 0x00, 0x02]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.total_ticks(), 4 + 8 + 24);
    assert_eq!(cpu.clock().total_mcycles(), 1 + 2 + 6);
}

#[test]
fn stats_rank_hottest_instructions() {
    let (mut cpu, mut bus) = setup(&[0x00, 0x00, 0x3C, 0x00]);
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    let stats = cpu.stats();
    assert_eq!(stats.instructions, 4);
    assert_eq!(stats.primary_count(0x00), 3);
    assert_eq!(stats.hottest(1), vec![(Instr::Nop, 3)]);
    assert_eq!(stats.hottest(10).len(), 2);
}

#[test]
fn trace_line_matches_reference_format() {
    let (cpu, mut bus) = setup(&[0x00, 0xC3, 0x13, 0x02]);
    let line = cpu.trace_line(&mut bus);
    assert_eq!(
        line.to_string(),
        "A:01 F:B0 B:00 C:13 D:00 E:D8 H:01 L:4D SP:FFFE PC:0100 PCMEM:00,C3,13,02"
    );
}

#[test]
fn disassembly_substitutes_operands() {
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xC3, 0x50, 0x01, 0x18, 0xFE, 0xE0, 0x44, 0xCB, 0x7C]);
    assert_eq!(disassemble(&mut bus, 0x0100), ("JP $0150".to_string(), 3));
    assert_eq!(disassemble(&mut bus, 0x0103), ("JR $0103".to_string(), 2));
    assert_eq!(disassemble(&mut bus, 0x0105), ("LDH ($FF44),A".to_string(), 2));
    assert_eq!(disassemble(&mut bus, 0x0107), ("BIT 7,H".to_string(), 2));
}

#[test]
fn primary_table_costs_and_lengths() {
    for (op, entry) in PRIMARY.iter().enumerate() {
        let ticks = entry.cost(false).ticks;
        assert!((4..=24).contains(&ticks), "opcode {op:02X}: {ticks}");
        assert!(entry.cost(true).ticks >= ticks, "opcode {op:02X}");
        assert!((1..=3).contains(&entry.length), "opcode {op:02X}");
    }

    let conditional = PRIMARY.iter().filter(|e| e.is_conditional()).count();
    assert_eq!(conditional, 16);

    let spot = [
        (0x00, 4),
        (0x01, 12),
        (0x08, 20),
        (0x36, 12),
        (0x76, 4),
        (0xC3, 16),
        (0xC5, 16),
        (0xCD, 24),
        (0xE0, 12),
        (0xE8, 16),
        (0xEA, 16),
        (0xF8, 12),
    ];
    for (op, ticks) in spot {
        assert_eq!(PRIMARY[op].cost(true).ticks, ticks, "opcode {op:02X}");
    }
}

#[test]
fn secondary_table_costs_include_prefix() {
    for (op, entry) in SECONDARY.iter().enumerate() {
        assert_eq!(entry.length, 2);
        let expected = match (op & 0x07 == 6, op >> 6) {
            (false, _) => 8,
            (true, 1) => 12,
            (true, _) => 16,
        };
        assert_eq!(entry.cost(false).ticks, expected, "CB {op:02X}");
        assert!(!entry.is_conditional());
    }
}

#[test]
fn undocumented_set_is_exact() {
    let undocumented: Vec<u8> = PRIMARY
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e.instr, Instr::Undocumented(_)))
        .map(|(op, _)| op as u8)
        .collect();
    assert_eq!(
        undocumented,
        [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
    );
}
