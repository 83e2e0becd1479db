use crate::aircraft::equipment::{Equipment, EquipmentService};
use crate::aircraft::snapshot::AircraftSnapshot;
use crate::signal_bus::BusError;
use crate::svc;

/// Once-only guards around ground-equipment commands.
///
/// Arrival connects happen exactly once per cycle even though the tick loop
/// re-evaluates the same conditions every second; departure removal is
/// unconditional and also once-only. PCA removal has its own gate because it
/// depends on APU state rather than on a phase change.
pub struct GroundEquipmentCoordinator {
    arrival_connected: bool,
    departure_removed: bool,
    pca_removed: bool,
}

impl GroundEquipmentCoordinator {
    pub fn new() -> Self {
        Self { arrival_connected: false, departure_removed: false, pca_removed: false }
    }

    pub fn arrival_connected(&self) -> bool { self.arrival_connected }
    pub fn departure_removed(&self) -> bool { self.departure_removed }

    /// Issues the arrival connect set (chocks, GPU, jetway, optionally PCA).
    /// Returns whether commands went out this call.
    pub fn connect_arrival(
        &mut self,
        service: &EquipmentService,
        connect_pca: bool,
    ) -> Result<bool, BusError> {
        if self.arrival_connected {
            return Ok(false);
        }
        service.request(Equipment::Chocks, true)?;
        service.request(Equipment::Gpu, true)?;
        service.request(Equipment::Jetway, true)?;
        if connect_pca {
            service.request(Equipment::Pca, true)?;
        }
        self.arrival_connected = true;
        svc!("Arrival ground equipment connected");
        Ok(true)
    }

    /// Departure removal. Deliberately takes no configuration: equipment and
    /// jetway always leave before pushback, whatever the operator disabled.
    pub fn remove_for_departure(&mut self, service: &EquipmentService) -> Result<bool, BusError> {
        if self.departure_removed {
            return Ok(false);
        }
        service.remove_all()?;
        self.departure_removed = true;
        self.pca_removed = true;
        Ok(true)
    }

    /// PCA leaves early, as soon as the aircraft can feed its own air:
    /// refuel and boarding done, APU running and its bleed supplying.
    pub fn maybe_remove_pca(
        &mut self,
        service: &EquipmentService,
        snapshot: &AircraftSnapshot,
        refuel_complete: bool,
        boarding_complete: bool,
    ) -> Result<bool, BusError> {
        if self.pca_removed || !snapshot.equipment.pca_connected {
            return Ok(false);
        }
        if refuel_complete && boarding_complete && snapshot.apu_available && snapshot.apu_bleed_on
        {
            service.request(Equipment::Pca, false)?;
            self.pca_removed = true;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn reset(&mut self) {
        self.arrival_connected = false;
        self.departure_removed = false;
        self.pca_removed = false;
    }
}

impl Default for GroundEquipmentCoordinator {
    fn default() -> Self { Self::new() }
}
