//! Account status notifications, routed on `data.status_change`.

use notifications_types::bbva::codes;
use notifications_types::bbva::{AccountData, AccountStatusChange};
use notifications_types::domain::bank_id;
use notifications_types::domain::events::{
    AccountBlock, AccountBlockNotification, AccountChargeOffNotification, AccountDataNotification,
    AccountOpenedNotification, AccountParticipantNotification, AccountStatusNotification,
};
use notifications_types::domain::{parse_date, parse_optional_date};
use notifications_types::{
    Action, DomainError, EntityRef, NormalizedNotification, Notification, NotificationEntity,
    NotificationType,
};

use super::{base, money, optional, required};

const CATEGORY: NotificationType = NotificationType::Account;

pub(super) fn dispatch(
    notification: &Notification,
    entity: &NotificationEntity,
) -> Result<NormalizedNotification, DomainError> {
    let data: AccountData = notification.decode_data()?;
    let status_change = data
        .status_change
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            DomainError::InvalidNotificationFormat(format!(
                "account notification {} has no status_change",
                notification.notification_id
            ))
        })?;
    let account_id = bank_id::account_id(required(&data.account_id, "account_id")?)?;

    let ctx = Ctx {
        notification,
        entity,
        data: &data,
        account_id,
    };

    match AccountStatusChange::parse(status_change)? {
        AccountStatusChange::AccountOpened => ctx.opened(),
        AccountStatusChange::DataChanged => ctx.data_changed(),
        AccountStatusChange::ParticipantAdded => ctx.participant(Action::Add),
        AccountStatusChange::ParticipantRemoved => ctx.participant(Action::Remove),
        AccountStatusChange::CreditsBlockAdded => ctx.block(AccountBlock::CreditAdded, Action::Add),
        AccountStatusChange::CreditsBlockRemoved => {
            ctx.block(AccountBlock::CreditRemoved, Action::Remove)
        }
        AccountStatusChange::DebitsBlockAdded => ctx.block(AccountBlock::DebitAdded, Action::Add),
        AccountStatusChange::DebitsBlockRemoved => {
            ctx.block(AccountBlock::DebitRemoved, Action::Remove)
        }
        AccountStatusChange::StatusChanged => ctx.status(),
        AccountStatusChange::ChargedOff => ctx.charged_off(),
    }
}

struct Ctx<'a> {
    notification: &'a Notification,
    entity: &'a NotificationEntity,
    data: &'a AccountData,
    account_id: String,
}

impl Ctx<'_> {
    fn base(&self, action: Action) -> NormalizedNotification {
        base(self.notification, self.entity, CATEGORY, action)
    }

    fn opened(&self) -> Result<NormalizedNotification, DomainError> {
        let event = AccountOpenedNotification {
            account_id: self.account_id.clone(),
            opened: parse_date(
                "status_change_reason",
                required(&self.data.status_change_reason, "status_change_reason")?,
            )?,
        };

        self.base(Action::Open).with_data(&event)
    }

    fn data_changed(&self) -> Result<NormalizedNotification, DomainError> {
        let event = AccountDataNotification {
            account_id: self.account_id.clone(),
            nickname: optional(&self.data.nickname),
            routing_number: optional(&self.data.routing_number),
            account_number_last_four: optional(&self.data.account_number).map(|n| last_four(&n)),
        };

        self.base(Action::Update)
            .with_attribute("data")
            .with_data(&event)
    }

    fn participant(&self, action: Action) -> Result<NormalizedNotification, DomainError> {
        let participant_id = required(&self.data.participant_id, "participant_id")?;
        if !EntityRef::parse(participant_id).is_known() {
            return Err(DomainError::InvalidEntityId(format!(
                "participant `{}`",
                participant_id
            )));
        }

        let event = AccountParticipantNotification {
            account_id: self.account_id.clone(),
            participant_id: participant_id.to_string(),
            role: codes::participant_role(required(
                &self.data.participant_role,
                "participant_role",
            )?)?,
        };

        self.base(action)
            .with_attribute("participant")
            .with_data(&event)
    }

    fn block(
        &self,
        block: AccountBlock,
        action: Action,
    ) -> Result<NormalizedNotification, DomainError> {
        let event = AccountBlockNotification {
            account_id: self.account_id.clone(),
            block,
            created: parse_optional_date(
                "status_change_reason",
                self.data.status_change_reason.as_deref(),
            )?,
        };

        self.base(action).with_attribute("block").with_data(&event)
    }

    fn status(&self) -> Result<NormalizedNotification, DomainError> {
        let event = AccountStatusNotification {
            account_id: self.account_id.clone(),
            status: codes::account_status(required(&self.data.status, "status")?)?,
        };

        self.base(Action::Update)
            .with_attribute("status")
            .with_data(&event)
    }

    fn charged_off(&self) -> Result<NormalizedNotification, DomainError> {
        let event = AccountChargeOffNotification {
            account_id: self.account_id.clone(),
            amount: money(
                self.data.charge_off_amount,
                &self.data.currency,
                "charge_off_amount",
            )?,
            charged_off: parse_date(
                "status_change_reason",
                required(&self.data.status_change_reason, "status_change_reason")?,
            )?,
        };

        self.base(Action::Update)
            .with_attribute("charge_off")
            .with_data(&event)
    }
}

fn last_four(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}
