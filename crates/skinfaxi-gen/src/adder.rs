//! Ripple-carry adder circuits (Cuccaro construction).

use skinfaxi_ir::{Circuit, QubitId};

use crate::error::GenResult;

/// Generate an in-place ripple-carry adder on two `nbits` registers.
///
/// Qubit layout: qubit 0 is the carry-in, qubits `2i+1` / `2i+2` hold
/// `b_i` / `a_i`, and the last qubit is the carry-out — `2 * nbits + 2`
/// qubits total. After execution register `b` holds `a + b`.
pub fn ripple_carry(nbits: u32) -> GenResult<Circuit> {
    let num_qubits = 2 * nbits + 2;
    let mut circuit = Circuit::with_size("adder", num_qubits, 0);

    let cin = QubitId(0);
    let b = |i: u32| QubitId(2 * i + 1);
    let a = |i: u32| QubitId(2 * i + 2);
    let cout = QubitId(num_qubits - 1);

    let maj = |circuit: &mut Circuit, c: QubitId, y: QubitId, x: QubitId| -> GenResult<()> {
        circuit.cx(x, y)?;
        circuit.cx(x, c)?;
        circuit.ccx(c, y, x)?;
        Ok(())
    };
    let uma = |circuit: &mut Circuit, c: QubitId, y: QubitId, x: QubitId| -> GenResult<()> {
        circuit.ccx(c, y, x)?;
        circuit.cx(x, c)?;
        circuit.cx(c, y)?;
        Ok(())
    };

    maj(&mut circuit, cin, b(0), a(0))?;
    for i in 1..nbits {
        maj(&mut circuit, a(i - 1), b(i), a(i))?;
    }

    circuit.cx(a(nbits - 1), cout)?;

    for i in (1..nbits).rev() {
        uma(&mut circuit, a(i - 1), b(i), a(i))?;
    }
    uma(&mut circuit, cin, b(0), a(0))?;

    Ok(circuit)
}
